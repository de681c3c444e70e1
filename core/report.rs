use crate::validator::ValidationError;
use serde::ser::{Serialize, Serializer};
use serde_derive::Serialize;

/// The verdict on one declared resource.
///
#[derive(Debug)]
pub enum Outcome {
    Passed,

    /// There was nothing to check the resource against.
    Skipped { reason: String },

    /// Never empty. Holds a single error when failing fast.
    Failed(Vec<ValidationError>),
}

impl Outcome {
    pub fn failed(err: ValidationError) -> Self {
        Outcome::Failed(vec![err])
    }

    pub fn is_passed(&self) -> bool {
        matches!(self, Outcome::Passed)
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped { .. })
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed(_))
    }

    pub fn errors(&self) -> &[ValidationError] {
        match self {
            Outcome::Failed(errors) => errors,
            _ => &[],
        }
    }
}

#[derive(Serialize)]
struct FailureView {
    kind: &'static str,
    message: String,
}

#[derive(Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
enum OutcomeView<'a> {
    Passed,
    Skipped { reason: &'a str },
    Failed { errors: Vec<FailureView> },
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let view = match self {
            Outcome::Passed => OutcomeView::Passed,
            Outcome::Skipped { reason } => OutcomeView::Skipped { reason },
            Outcome::Failed(errors) => OutcomeView::Failed {
                errors: errors
                    .iter()
                    .map(|err| FailureView {
                        kind: err.kind(),
                        message: err.to_string(),
                    })
                    .collect(),
            },
        };
        view.serialize(serializer)
    }
}

#[derive(Debug, Serialize)]
pub struct ResourceReport {
    pub logical_id: String,
    pub resource_type: String,
    #[serde(flatten)]
    pub outcome: Outcome,
}

/// Every resource of a template with its outcome, ordered by logical id.
///
#[derive(Debug, Default, Serialize)]
pub struct StackReport {
    passed: usize,
    failed: usize,
    skipped: usize,
    resources: Vec<ResourceReport>,
}

impl StackReport {
    pub fn new(mut resources: Vec<ResourceReport>) -> Self {
        resources.sort_by(|a, b| a.logical_id.cmp(&b.logical_id));
        let count = |f: fn(&Outcome) -> bool| resources.iter().filter(|r| f(&r.outcome)).count();
        Self {
            passed: count(Outcome::is_passed),
            failed: count(Outcome::is_failed),
            skipped: count(Outcome::is_skipped),
            resources,
        }
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    pub fn skipped(&self) -> usize {
        self.skipped
    }

    pub fn resources(&self) -> &[ResourceReport] {
        self.resources.as_ref()
    }

    pub fn get(&self, logical_id: &str) -> Option<&ResourceReport> {
        self.resources.iter().find(|r| r.logical_id == logical_id)
    }

    /// Skipped resources do not fail a stack.
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
