use super::{DescribeRequest, DescriptorClient, DescriptorError, EnvelopeRegistry, LiveAttributes};
use crate::schema::{SchemaError, TypeSchema};
use std::sync::Arc;
use tracing::*;

/// Fetches the live attribute map of a single resource.
///
/// This is all a `GetAtt` needs: it never builds a validator for the referenced resource.
///
#[derive(Clone)]
pub struct DescriptorResolver {
    client: Arc<dyn DescriptorClient>,
    envelopes: Arc<EnvelopeRegistry>,
}

impl std::fmt::Debug for DescriptorResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DescriptorResolver")
            .field("envelopes", &self.envelopes)
            .finish_non_exhaustive()
    }
}

impl DescriptorResolver {
    pub fn new(client: Arc<dyn DescriptorClient>, envelopes: Arc<EnvelopeRegistry>) -> Self {
        Self { client, envelopes }
    }

    pub fn with_builtin_envelopes(client: Arc<dyn DescriptorClient>) -> Self {
        Self::new(client, Arc::new(EnvelopeRegistry::builtin()))
    }

    #[instrument(name = "DescriptorResolver::describe", skip(self, schema))]
    pub fn describe(
        &self,
        schema: &TypeSchema,
        physical_id: &str,
    ) -> Result<LiveAttributes, DescriptorError> {
        // NOTE: a schema-level envelope wins over the service-wide rule, so that one service can
        // answer differently shaped responses for different describe methods.
        let rule = match schema.envelope() {
            Some(rule) => rule,
            None => self
                .envelopes
                .get(schema.resolver())
                .ok_or_else(|| SchemaError::UnsupportedService {
                    service: schema.resolver().to_string(),
                })?,
        };

        let request = DescribeRequest {
            service: schema.resolver().to_string(),
            method: schema.lookup_method().to_string(),
            id_parameter: schema.id_parameter().to_string(),
            physical_id: physical_id.to_string(),
        };

        let response = self.client.describe(&request)?;

        let unwrapped = match rule.select(&response) {
            Some(value) => value,
            None => {
                return Err(DescriptorError::EmptyEnvelope {
                    request,
                    paths: rule.to_string(),
                })
            }
        };

        match unwrapped {
            serde_json::Value::Object(attributes) => {
                debug!(
                    "Described {} with {} attributes",
                    request,
                    attributes.len()
                );
                Ok(attributes.clone())
            }
            other => Err(DescriptorError::NotAnObject {
                request,
                value: other.clone(),
            }),
        }
    }
}
