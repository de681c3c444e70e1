use super::StackError;
use serde_derive::{Deserialize, Serialize};
use std::path::Path;
use tracing::*;

pub const SETTLED_STATUSES: &[&str] = &["CREATE_COMPLETE", "UPDATE_COMPLETE"];
static FAILED_MARKER: &str = "FAILED";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackEvent {
    #[serde(default)]
    logical_resource_id: String,

    resource_status: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    resource_status_reason: Option<String>,
}

impl StackEvent {
    pub fn new<L, S>(logical_resource_id: L, resource_status: S) -> Self
    where
        L: Into<String>,
        S: Into<String>,
    {
        Self {
            logical_resource_id: logical_resource_id.into(),
            resource_status: resource_status.into(),
            resource_status_reason: None,
        }
    }

    pub fn logical_resource_id(&self) -> &str {
        self.logical_resource_id.as_ref()
    }

    pub fn resource_status(&self) -> &str {
        self.resource_status.as_ref()
    }

    pub fn is_failure(&self) -> bool {
        self.resource_status.contains(FAILED_MARKER)
    }
}

impl std::fmt::Display for StackEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.logical_resource_id, self.resource_status)?;
        if let Some(reason) = &self.resource_status_reason {
            write!(f, " ({})", reason)?;
        }
        Ok(())
    }
}

/// The status of a stack and the events it went through to get there.
///
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct StackSnapshot {
    #[serde(default)]
    stack_name: String,

    stack_status: String,

    #[serde(default)]
    stack_events: Vec<StackEvent>,
}

impl StackSnapshot {
    pub fn new<N, S>(stack_name: N, stack_status: S, stack_events: Vec<StackEvent>) -> Self
    where
        N: Into<String>,
        S: Into<String>,
    {
        Self {
            stack_name: stack_name.into(),
            stack_status: stack_status.into(),
            stack_events,
        }
    }

    #[instrument(name = "StackSnapshot::load")]
    pub fn load(path: &Path) -> Result<Self, StackError> {
        let contents =
            std::fs::read_to_string(path).map_err(|err| StackError::CouldNotReadFile {
                path: path.to_path_buf(),
                err,
            })?;
        Ok(serde_json::from_str(&contents)?)
    }

    pub fn stack_name(&self) -> &str {
        self.stack_name.as_ref()
    }

    pub fn stack_status(&self) -> &str {
        self.stack_status.as_ref()
    }

    pub fn stack_events(&self) -> &[StackEvent] {
        self.stack_events.as_ref()
    }
}

/// A stack is healthy when it settled into a complete status and none of its resources ever
/// reported a failure on the way there.
///
#[instrument(name = "stack::check_stack_health", skip(snapshot), fields(stack = snapshot.stack_name()))]
pub fn check_stack_health(snapshot: &StackSnapshot) -> Result<(), StackError> {
    if !SETTLED_STATUSES.contains(&snapshot.stack_status()) {
        return Err(StackError::Unsettled {
            stack: snapshot.stack_name().to_string(),
            status: snapshot.stack_status().to_string(),
            expected: SETTLED_STATUSES.iter().map(ToString::to_string).collect(),
        });
    }

    let failures: Vec<StackEvent> = snapshot
        .stack_events()
        .iter()
        .filter(|event| event.is_failure())
        .cloned()
        .collect();

    if !failures.is_empty() {
        return Err(StackError::FailedEvents {
            stack: snapshot.stack_name().to_string(),
            failures,
        });
    }

    debug!(
        "Stack {} is healthy after {} events",
        snapshot.stack_name(),
        snapshot.stack_events().len()
    );
    Ok(())
}
