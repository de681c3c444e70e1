use super::DescriptorError;
use serde_derive::Serialize;

/// A single describe call: `<service>.<method>(<id_parameter>=[<physical_id>])`.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DescribeRequest {
    pub service: String,
    pub method: String,
    pub id_parameter: String,
    pub physical_id: String,
}

impl std::fmt::Display for DescribeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}.{}({}=[{:?}])",
            self.service, self.method, self.id_parameter, self.physical_id
        )
    }
}

/// Anything that can answer a describe call with the provider's raw response.
///
/// Implementations return the response exactly as the provider shaped it; unwrapping the
/// envelope is done by the `DescriptorResolver`. Calls block, and retrying transient failures
/// is up to the implementation or its caller.
///
pub trait DescriptorClient: Send + Sync {
    fn describe(&self, request: &DescribeRequest) -> Result<serde_json::Value, DescriptorError>;
}

impl<T: DescriptorClient + ?Sized> DescriptorClient for std::sync::Arc<T> {
    fn describe(&self, request: &DescribeRequest) -> Result<serde_json::Value, DescriptorError> {
        (**self).describe(request)
    }
}
