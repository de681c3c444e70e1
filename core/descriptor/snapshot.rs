use super::{DescribeRequest, DescriptorClient, DescriptorError};
use fxhash::FxHashMap;
use std::path::Path;
use tracing::*;

type ByPhysicalId = FxHashMap<String, serde_json::Value>;
type ByMethod = FxHashMap<String, ByPhysicalId>;

/// A `DescriptorClient` that replays recorded describe responses.
///
/// Snapshots are stored as `{ service: { method: { physical_id: response } } }`, where each
/// response is the raw envelope the provider returned.
///
#[derive(Default, Debug, Clone)]
pub struct SnapshotClient {
    responses: FxHashMap<String, ByMethod>,
}

impl SnapshotClient {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(name = "SnapshotClient::load")]
    pub fn load(path: &Path) -> Result<Self, DescriptorError> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| DescriptorError::CouldNotReadSnapshot {
                path: path.to_path_buf(),
                err,
            })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, DescriptorError> {
        let responses: FxHashMap<String, ByMethod> = serde_json::from_str(contents)?;
        Ok(Self { responses })
    }

    pub fn insert<S, M, I>(&mut self, service: S, method: M, physical_id: I, response: serde_json::Value)
    where
        S: Into<String>,
        M: Into<String>,
        I: Into<String>,
    {
        self.responses
            .entry(service.into())
            .or_default()
            .entry(method.into())
            .or_default()
            .insert(physical_id.into(), response);
    }

    pub fn len(&self) -> usize {
        self.responses
            .values()
            .flat_map(|methods| methods.values())
            .map(|ids| ids.len())
            .sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl DescriptorClient for SnapshotClient {
    fn describe(&self, request: &DescribeRequest) -> Result<serde_json::Value, DescriptorError> {
        self.responses
            .get(&request.service)
            .and_then(|methods| methods.get(&request.method))
            .and_then(|ids| ids.get(&request.physical_id))
            .cloned()
            .ok_or_else(|| DescriptorError::NotFound {
                request: request.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::prelude::*;
    use serde_json::json;

    fn request(physical_id: &str) -> DescribeRequest {
        DescribeRequest {
            service: "autoscaling".to_string(),
            method: "describe_auto_scaling_groups".to_string(),
            id_parameter: "AutoScalingGroupNames".to_string(),
            physical_id: physical_id.to_string(),
        }
    }

    #[test]
    fn replays_recorded_responses_from_disk() {
        let dir = assert_fs::TempDir::new().unwrap();
        let file = dir.child("snapshots.json");
        file.write_str(
            r#"
            {
                "autoscaling": {
                    "describe_auto_scaling_groups": {
                        "asg-1": { "AutoScalingGroups": [{ "MinSize": 1 }] }
                    }
                }
            }
            "#,
        )
        .unwrap();

        let client = SnapshotClient::load(file.path()).unwrap();
        assert_eq!(client.len(), 1);
        assert_eq!(
            client.describe(&request("asg-1")).unwrap(),
            json!({ "AutoScalingGroups": [{ "MinSize": 1 }] })
        );
    }

    #[test]
    fn unrecorded_requests_are_not_found() {
        let client = SnapshotClient::new();
        assert!(client.is_empty());
        let err = client.describe(&request("asg-2")).unwrap_err();
        insta::assert_snapshot!(
            err.to_string(),
            @r###"No live resource found for autoscaling.describe_auto_scaling_groups(AutoScalingGroupNames=["asg-2"])"###
        );
    }
}
