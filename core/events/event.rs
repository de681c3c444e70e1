#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum ResourceEvent {
    ResourceStarted {
        logical_id: String,
        resource_type: String,
    },
    ResourceSkipped {
        logical_id: String,
        resource_type: String,
        reason: String,
    },
    ResourcePassed {
        logical_id: String,
    },
    ResourceFailed {
        logical_id: String,
        errors: Vec<String>,
    },
}

impl ResourceEvent {
    pub fn logical_id(&self) -> &str {
        match self {
            ResourceEvent::ResourceStarted { logical_id, .. }
            | ResourceEvent::ResourceSkipped { logical_id, .. }
            | ResourceEvent::ResourcePassed { logical_id }
            | ResourceEvent::ResourceFailed { logical_id, .. } => logical_id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkflowEvent {
    ValidationStarted {
        resource_count: usize,
    },
    ValidationCompleted {
        passed: usize,
        failed: usize,
        skipped: usize,
    },
    Shutdown,
}

#[derive(Default, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Event {
    /// The "nothing happened" event.
    #[default]
    Noop,
    ResourceEvent(ResourceEvent),
    WorkflowEvent(WorkflowEvent),
}

impl Event {
    pub fn is_completion(&self) -> bool {
        matches!(
            self,
            Event::WorkflowEvent(WorkflowEvent::ValidationCompleted { .. })
        )
    }
}

impl From<ResourceEvent> for Event {
    fn from(value: ResourceEvent) -> Self {
        Event::ResourceEvent(value)
    }
}

impl From<WorkflowEvent> for Event {
    fn from(value: WorkflowEvent) -> Self {
        Event::WorkflowEvent(value)
    }
}
