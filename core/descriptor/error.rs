use super::DescribeRequest;
use crate::schema::SchemaError;
use std::path::PathBuf;
use thiserror::*;

#[derive(Error, Debug)]
pub enum DescriptorError {
    #[error("No live resource found for {request}")]
    NotFound { request: DescribeRequest },

    #[error("The response to {request} did not contain any of the expected paths: {paths}")]
    EmptyEnvelope {
        request: DescribeRequest,
        paths: String,
    },

    #[error("Expected the unwrapped response to {request} to be an object, but found {value}")]
    NotAnObject {
        request: DescribeRequest,
        value: serde_json::Value,
    },

    #[error("Invalid envelope path {path:?}")]
    InvalidPath { path: String },

    #[error(transparent)]
    Schema(SchemaError),

    #[error("Descriptor client failed: {0}")]
    ClientError(String),

    #[error("Could not read descriptor snapshot at {path:?} due to {err:?}")]
    CouldNotReadSnapshot { path: PathBuf, err: std::io::Error },

    #[error("Could not parse descriptor snapshot: {0:?}")]
    ParseError(serde_json::Error),
}

impl From<serde_json::Error> for DescriptorError {
    fn from(value: serde_json::Error) -> Self {
        DescriptorError::ParseError(value)
    }
}

impl From<SchemaError> for DescriptorError {
    fn from(value: SchemaError) -> Self {
        DescriptorError::Schema(value)
    }
}
