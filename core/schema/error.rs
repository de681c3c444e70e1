use std::path::PathBuf;
use thiserror::*;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("No schema registered for resource type {resource_type:?}")]
    UnknownResourceType { resource_type: String },

    #[error("Resource type {resource_type:?} has no attribute mapping for {attribute:?}")]
    UnmappedAttribute {
        resource_type: String,
        attribute: String,
    },

    #[error("Unsupported service: {service}")]
    UnsupportedService { service: String },

    #[error("Could not read schema registry at {path:?} due to {err:?}")]
    CouldNotReadRegistry { path: PathBuf, err: std::io::Error },

    #[error("Could not parse schema registry: {0:?}")]
    ParseError(serde_json::Error),

    #[error("Attempted to build a TypeSchema while missing fields: {0:?}")]
    BuilderError(derive_builder::UninitializedFieldError),
}

impl From<serde_json::Error> for SchemaError {
    fn from(value: serde_json::Error) -> Self {
        SchemaError::ParseError(value)
    }
}

impl From<derive_builder::UninitializedFieldError> for SchemaError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        SchemaError::BuilderError(value)
    }
}
