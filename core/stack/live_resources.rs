use super::StackError;
use serde_derive::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::*;

static STACK_RESOURCES_KEY: &str = "StackResources";

/// A deployed resource, as reported by the deployment it belongs to.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LiveResource {
    physical_resource_id: String,

    /// Only `GetAtt` needs it, so hand-written maps may leave it out.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_status: Option<String>,

    /// Every other field the deployment reported, kept verbatim.
    #[serde(flatten)]
    extra: BTreeMap<String, serde_json::Value>,
}

impl LiveResource {
    pub fn new<P, T>(physical_resource_id: P, resource_type: T) -> Self
    where
        P: Into<String>,
        T: Into<String>,
    {
        Self {
            physical_resource_id: physical_resource_id.into(),
            resource_type: Some(resource_type.into()),
            resource_status: None,
            extra: BTreeMap::new(),
        }
    }

    /// A resource known only by its physical id.
    pub fn untyped<P: Into<String>>(physical_resource_id: P) -> Self {
        Self {
            physical_resource_id: physical_resource_id.into(),
            resource_type: None,
            resource_status: None,
            extra: BTreeMap::new(),
        }
    }

    pub fn physical_resource_id(&self) -> &str {
        self.physical_resource_id.as_ref()
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.resource_type.as_deref()
    }

    pub fn resource_status(&self) -> Option<&str> {
        self.resource_status.as_deref()
    }

    pub fn extra(&self) -> &BTreeMap<String, serde_json::Value> {
        &self.extra
    }
}

/// Logical id to live resource, for one deployment at one point in time.
///
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LiveResourceMap {
    resources: BTreeMap<String, LiveResource>,
}

impl LiveResourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    #[instrument(name = "LiveResourceMap::load")]
    pub fn load(path: &Path) -> Result<Self, StackError> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| StackError::CouldNotReadFile {
                path: path.to_path_buf(),
                err,
            })?;
        Self::from_json_str(&contents)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, StackError> {
        let value: serde_json::Value = serde_json::from_str(contents)?;
        Self::from_value(value)
    }

    /// Accepts either a raw `DescribeStackResources` response (`{"StackResources": [...]}`) or
    /// a map already keyed by logical id.
    ///
    pub fn from_value(value: serde_json::Value) -> Result<Self, StackError> {
        match value {
            serde_json::Value::Object(mut map) if map.contains_key(STACK_RESOURCES_KEY) => {
                let entries = map.remove(STACK_RESOURCES_KEY).unwrap_or_default();
                Self::from_stack_resources(entries)
            }
            other => Ok(serde_json::from_value(other)?),
        }
    }

    fn from_stack_resources(entries: serde_json::Value) -> Result<Self, StackError> {
        #[derive(Deserialize)]
        #[serde(rename_all = "PascalCase")]
        struct StackResource {
            logical_resource_id: Option<String>,
            #[serde(flatten)]
            resource: LiveResource,
        }

        let entries: Vec<StackResource> = serde_json::from_value(entries)?;
        let mut resources = Self::new();
        for (index, entry) in entries.into_iter().enumerate() {
            let logical_id = entry
                .logical_resource_id
                .ok_or(StackError::MissingLogicalId { index })?;
            resources.insert(logical_id, entry.resource);
        }
        debug!("Found {} stack resources", resources.len());
        Ok(resources)
    }

    pub fn insert<S: Into<String>>(&mut self, logical_id: S, resource: LiveResource) -> &mut Self {
        self.resources.insert(logical_id.into(), resource);
        self
    }

    pub fn get(&self, logical_id: &str) -> Option<&LiveResource> {
        self.resources.get(logical_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &LiveResource)> {
        self.resources.iter()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
