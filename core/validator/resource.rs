use super::{ReferenceResolver, ValidationError};
use crate::descriptor::LiveAttributes;
use crate::model::{DeclaredValue, Resolved};
use crate::schema::TypeSchema;
use crate::template::DeclaredProperties;
use fxhash::FxHashSet;
use std::collections::BTreeMap;
use tracing::*;

pub const DEFAULT_TAG_PROPERTY: &str = "Tags";
static TAG_KEY_FIELD: &str = "Key";
static TAG_VALUE_FIELD: &str = "Value";

/// Checks one live resource against its declaration.
///
/// Three passes run in order:
///
/// 1. every declared property (except tags) must equal its live attribute,
/// 2. every schema default the declaration does not mention must hold on the live resource,
/// 3. every declared tag must be present on the live resource with the same value; extra live
///    tags are fine.
///
#[derive(Debug, Clone, Copy)]
pub struct ResourceValidator<'a> {
    schema: &'a TypeSchema,
    resolver: ReferenceResolver<'a>,
    tag_property: &'a str,
}

impl<'a> ResourceValidator<'a> {
    pub fn new(schema: &'a TypeSchema, resolver: ReferenceResolver<'a>) -> Self {
        Self {
            schema,
            resolver,
            tag_property: DEFAULT_TAG_PROPERTY,
        }
    }

    pub fn with_tag_property(mut self, tag_property: &'a str) -> Self {
        self.tag_property = tag_property;
        self
    }

    /// Stop at the first disagreement.
    ///
    #[instrument(name = "ResourceValidator::validate", skip_all)]
    pub fn validate(
        &self,
        declared: &DeclaredProperties,
        actual: &LiveAttributes,
    ) -> Result<(), ValidationError> {
        self.run(declared, actual, true).map(|_| ())
    }

    /// Keep going past mismatches and return all of them. Errors that prevent a check from
    /// being carried out at all (unknown references, missing schemas, ...) still abort.
    ///
    #[instrument(name = "ResourceValidator::collect_mismatches", skip_all)]
    pub fn collect_mismatches(
        &self,
        declared: &DeclaredProperties,
        actual: &LiveAttributes,
    ) -> Result<Vec<ValidationError>, ValidationError> {
        self.run(declared, actual, false)
    }

    fn run(
        &self,
        declared: &DeclaredProperties,
        actual: &LiveAttributes,
        fail_fast: bool,
    ) -> Result<Vec<ValidationError>, ValidationError> {
        let mut mismatches = vec![];
        let mut report = |mismatch: ValidationError| -> Result<(), ValidationError> {
            if fail_fast {
                Err(mismatch)
            } else {
                mismatches.push(mismatch);
                Ok(())
            }
        };

        // Names a default must not be checked against, whether the declaration spelled them as
        // the declared property or as the live attribute it maps to.
        let mut covered: FxHashSet<&str> = FxHashSet::default();

        for (property, value) in declared {
            covered.insert(property.as_str());
            covered.insert(self.schema.live_property_key(property));
            if property == self.tag_property {
                continue;
            }
            if let Some(mismatch) = self.check_property(property, value, actual)? {
                report(mismatch)?;
            }
        }

        for (key, expectation) in self.schema.defaults() {
            if covered.contains(key.as_str()) {
                continue;
            }
            let live = Resolved::lookup(actual, key);
            if !expectation.accepts(&live) {
                report(ValidationError::DefaultMismatch {
                    property: key.clone(),
                    expected: expectation.clone(),
                    actual: live,
                })?;
            }
        }

        if let Some(tags) = declared.get(self.tag_property) {
            for mismatch in self.check_tags(tags, actual)? {
                report(mismatch)?;
            }
        }

        Ok(mismatches)
    }

    fn check_property(
        &self,
        property: &str,
        value: &DeclaredValue,
        actual: &LiveAttributes,
    ) -> Result<Option<ValidationError>, ValidationError> {
        let expected = self.resolver.resolve(value)?;
        let live = Resolved::lookup(actual, self.schema.live_property_key(property));
        if expected == live {
            return Ok(None);
        }
        debug!("{} expected {} but found {}", property, expected, live);
        Ok(Some(ValidationError::PropertyMismatch {
            property: property.to_string(),
            expected,
            actual: live,
        }))
    }

    fn check_tags(
        &self,
        declared: &DeclaredValue,
        actual: &LiveAttributes,
    ) -> Result<Vec<ValidationError>, ValidationError> {
        let expected = self.declared_tags(declared)?;
        let live = live_tags(&Resolved::lookup(actual, self.schema.tag_key()));

        let mut mismatches = vec![];
        for (key, value) in expected {
            let found = live.get(&key).cloned().unwrap_or(Resolved::Absent);
            if found != value {
                mismatches.push(ValidationError::TagMismatch {
                    key,
                    expected: value,
                    actual: found,
                });
            }
        }
        Ok(mismatches)
    }

    fn declared_tags(
        &self,
        declared: &DeclaredValue,
    ) -> Result<BTreeMap<String, Resolved>, ValidationError> {
        let malformed = || ValidationError::UnsupportedValue {
            value: format!("{}: {}", self.tag_property, declared),
        };

        let mut tags = BTreeMap::new();
        for entry in declared.as_list().ok_or_else(malformed)? {
            let entry = entry.as_map().ok_or_else(malformed)?;
            let key = entry.get(TAG_KEY_FIELD).ok_or_else(malformed)?;
            let key = match self.resolver.resolve(key)? {
                Resolved::Scalar(key) => key,
                _ => return Err(malformed()),
            };
            let value = match entry.get(TAG_VALUE_FIELD) {
                Some(value) => self.resolver.resolve(value)?,
                None => Resolved::Absent,
            };
            tags.insert(key, value);
        }
        Ok(tags)
    }
}

/// Live tag lists are read leniently: entries without a scalar `Key` are ignored.
fn live_tags(tags: &Resolved) -> BTreeMap<String, Resolved> {
    let mut out = BTreeMap::new();
    if let Resolved::List(entries) = tags {
        for entry in entries {
            if let Resolved::Map(fields) = entry {
                if let Some(Resolved::Scalar(key)) = fields.get(TAG_KEY_FIELD) {
                    let value = fields
                        .get(TAG_VALUE_FIELD)
                        .cloned()
                        .unwrap_or(Resolved::Absent);
                    out.insert(key.clone(), value);
                }
            }
        }
    }
    out
}
