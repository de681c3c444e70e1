use super::SchemaError;
use crate::descriptor::UnwrapRule;
use crate::model::Resolved;
use fxhash::FxHashMap;
use serde_derive::Deserialize;
use std::collections::BTreeMap;

static DEFAULT_TAG_KEY: &str = "Tags";

fn default_tag_key() -> String {
    DEFAULT_TAG_KEY.to_string()
}

/// How to fetch and interpret the live form of one resource type.
///
/// The field names of the registry file follow the describe-call vocabulary:
///
/// ```json
/// {
///   "client": "ec2",
///   "describe_method": "describe_instances",
///   "id_param": "InstanceIds",
///   "attribute_mapping": { "PublicIp": "PublicIpAddress" },
///   "defaults": { "InstanceType": ["t2.micro", "t2.small"] }
/// }
/// ```
///
#[derive(Builder, Debug, Clone, PartialEq, Deserialize)]
#[builder(build_fn(error = "SchemaError"))]
pub struct TypeSchema {
    /// The descriptor service to call, e.g. `ec2` or `elbv2`.
    #[serde(rename = "client")]
    #[builder(setter(into))]
    resolver: String,

    #[serde(rename = "describe_method")]
    #[builder(setter(into))]
    lookup_method: String,

    #[serde(rename = "id_param")]
    #[builder(setter(into))]
    id_parameter: String,

    /// Declared property name to live attribute key. Unlisted names map to themselves.
    #[serde(default)]
    #[builder(default)]
    property_mapping: FxHashMap<String, String>,

    /// `GetAtt` attribute name to live attribute key.
    #[serde(default)]
    #[builder(default)]
    attribute_mapping: FxHashMap<String, String>,

    /// Expectations on live attributes that a declaration does not mention.
    #[serde(default)]
    #[builder(default)]
    defaults: BTreeMap<String, DefaultExpectation>,

    #[serde(default = "default_tag_key")]
    #[builder(setter(into), default = "default_tag_key()")]
    tag_key: String,

    /// Overrides the service-wide envelope rule for this type only.
    #[serde(default)]
    #[builder(default, setter(strip_option))]
    envelope: Option<UnwrapRule>,
}

impl TypeSchema {
    pub fn builder() -> TypeSchemaBuilder {
        TypeSchemaBuilder::default()
    }

    pub fn resolver(&self) -> &str {
        self.resolver.as_ref()
    }

    pub fn lookup_method(&self) -> &str {
        self.lookup_method.as_ref()
    }

    pub fn id_parameter(&self) -> &str {
        self.id_parameter.as_ref()
    }

    pub fn live_property_key<'a>(&'a self, declared: &'a str) -> &'a str {
        self.property_mapping
            .get(declared)
            .map(String::as_str)
            .unwrap_or(declared)
    }

    pub fn live_attribute_key(&self, attribute: &str) -> Option<&str> {
        self.attribute_mapping.get(attribute).map(String::as_str)
    }

    pub fn defaults(&self) -> &BTreeMap<String, DefaultExpectation> {
        &self.defaults
    }

    pub fn tag_key(&self) -> &str {
        self.tag_key.as_ref()
    }

    pub fn envelope(&self) -> Option<&UnwrapRule> {
        self.envelope.as_ref()
    }
}

impl TypeSchemaBuilder {
    pub fn map_property<D, L>(&mut self, declared: D, live: L) -> &mut Self
    where
        D: Into<String>,
        L: Into<String>,
    {
        self.property_mapping
            .get_or_insert_with(Default::default)
            .insert(declared.into(), live.into());
        self
    }

    pub fn map_attribute<A, L>(&mut self, attribute: A, live: L) -> &mut Self
    where
        A: Into<String>,
        L: Into<String>,
    {
        self.attribute_mapping
            .get_or_insert_with(Default::default)
            .insert(attribute.into(), live.into());
        self
    }

    pub fn default_for<L>(&mut self, live: L, expectation: DefaultExpectation) -> &mut Self
    where
        L: Into<String>,
    {
        self.defaults
            .get_or_insert_with(Default::default)
            .insert(live.into(), expectation);
        self
    }
}

/// What an undeclared live attribute is expected to hold.
///
/// In the registry file a JSON array reads as a set of acceptable values; anything else is the
/// one exact value expected.
///
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum DefaultExpectation {
    OneOf(Vec<Resolved>),
    Exact(Resolved),
}

impl DefaultExpectation {
    pub fn accepts(&self, actual: &Resolved) -> bool {
        match self {
            DefaultExpectation::OneOf(allowed) => allowed.contains(actual),
            DefaultExpectation::Exact(expected) => expected == actual,
        }
    }
}

impl From<serde_json::Value> for DefaultExpectation {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Array(items) => {
                Self::OneOf(items.iter().map(Resolved::from).collect())
            }
            other => Self::Exact(other.into()),
        }
    }
}

impl std::fmt::Display for DefaultExpectation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultExpectation::Exact(value) => write!(f, "{}", value),
            DefaultExpectation::OneOf(allowed) => {
                write!(f, "one of [")?;
                for (idx, value) in allowed.iter().enumerate() {
                    if idx > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", value)?;
                }
                write!(f, "]")
            }
        }
    }
}
