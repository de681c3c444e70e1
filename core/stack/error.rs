use std::path::PathBuf;
use thiserror::*;

#[derive(Error, Debug)]
pub enum StackError {
    #[error("Stack {stack} is in status {status}, expected one of {expected:?}")]
    Unsettled {
        stack: String,
        status: String,
        expected: Vec<String>,
    },

    #[error("Stack {stack} has {} failed events, first: {}", .failures.len(), .failures.first().map(ToString::to_string).unwrap_or_default())]
    FailedEvents {
        stack: String,
        failures: Vec<super::StackEvent>,
    },

    #[error("Stack resource entry #{index} is missing its LogicalResourceId")]
    MissingLogicalId { index: usize },

    #[error("Could not read {path:?} due to {err:?}")]
    CouldNotReadFile { path: PathBuf, err: std::io::Error },

    #[error("Could not parse stack description: {0:?}")]
    ParseError(serde_json::Error),
}

impl From<serde_json::Error> for StackError {
    fn from(value: serde_json::Error) -> Self {
        StackError::ParseError(value)
    }
}
