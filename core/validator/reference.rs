use super::ValidationError;
use crate::descriptor::DescriptorResolver;
use crate::model::{DeclaredValue, Resolved, SymbolicRef};
use crate::schema::{SchemaError, SchemaRegistry};
use crate::stack::{LiveResource, LiveResourceMap};
use tracing::*;

/// Turns declared values into comparable ones, following references into the live stack.
///
/// A resolver only borrows its inputs and keeps no state of its own between calls.
///
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    schemas: &'a SchemaRegistry,
    descriptors: &'a DescriptorResolver,
    live: &'a LiveResourceMap,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(
        schemas: &'a SchemaRegistry,
        descriptors: &'a DescriptorResolver,
        live: &'a LiveResourceMap,
    ) -> Self {
        Self {
            schemas,
            descriptors,
            live,
        }
    }

    pub fn live_resources(&self) -> &'a LiveResourceMap {
        self.live
    }

    pub fn resolve(&self, value: &DeclaredValue) -> Result<Resolved, ValidationError> {
        match value {
            DeclaredValue::Null => Ok(Resolved::Absent),
            DeclaredValue::Bool(b) => Ok(Resolved::Scalar(b.to_string())),
            DeclaredValue::Number(n) => Ok(Resolved::Scalar(n.to_string())),
            DeclaredValue::String(s) => Ok(Resolved::Scalar(s.clone())),
            DeclaredValue::List(items) => Ok(Resolved::List(
                items
                    .iter()
                    .map(|item| self.resolve(item))
                    .collect::<Result<_, _>>()?,
            )),
            DeclaredValue::Map(map) => {
                let mut out = std::collections::BTreeMap::new();
                for (k, v) in map {
                    out.insert(k.clone(), self.resolve(v)?);
                }
                Ok(Resolved::Map(out))
            }
            DeclaredValue::Reference(reference) => self.resolve_reference(reference),
            DeclaredValue::Intrinsic { .. } => Err(ValidationError::UnsupportedValue {
                value: value.to_string(),
            }),
        }
    }

    #[instrument(name = "ReferenceResolver::resolve_reference", skip(self))]
    pub fn resolve_reference(&self, reference: &SymbolicRef) -> Result<Resolved, ValidationError> {
        match reference {
            SymbolicRef::Ref { logical_id } => {
                let resource = self.live_resource(logical_id)?;
                Ok(Resolved::scalar(resource.physical_resource_id()))
            }

            SymbolicRef::GetAtt {
                logical_id,
                attribute,
            } => {
                let resource = self.live_resource(logical_id)?;
                let resource_type = resource.resource_type().ok_or_else(|| {
                    SchemaError::UnknownResourceType {
                        resource_type: String::new(),
                    }
                })?;
                let schema = self.schemas.require(resource_type)?;

                // NB: the attribute mapping is checked before describing anything, so an
                // unmapped attribute fails the same way no matter what the live resource holds.
                let key = schema.live_attribute_key(attribute).ok_or_else(|| {
                    SchemaError::UnmappedAttribute {
                        resource_type: resource_type.to_string(),
                        attribute: attribute.to_string(),
                    }
                })?;

                let attributes = self
                    .descriptors
                    .describe(&schema, resource.physical_resource_id())?;

                let value = Resolved::lookup(&attributes, key);
                debug!("Resolved {} to {}", reference, value);
                Ok(value)
            }
        }
    }

    fn live_resource(&self, logical_id: &str) -> Result<&'a LiveResource, ValidationError> {
        self.live
            .get(logical_id)
            .ok_or_else(|| ValidationError::Reference {
                logical_id: logical_id.to_string(),
            })
    }
}
