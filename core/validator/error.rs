use crate::descriptor::DescriptorError;
use crate::model::Resolved;
use crate::schema::{DefaultExpectation, SchemaError};
use thiserror::*;

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Unknown logical id {logical_id:?}: it is not part of the live stack")]
    Reference { logical_id: String },

    #[error(transparent)]
    Schema(SchemaError),

    #[error("Mismatch for {property}: expected {expected}, got {actual}")]
    PropertyMismatch {
        property: String,
        expected: Resolved,
        actual: Resolved,
    },

    #[error("Default mismatch for {property}: expected {expected}, got {actual}")]
    DefaultMismatch {
        property: String,
        expected: DefaultExpectation,
        actual: Resolved,
    },

    #[error("Tag mismatch for {key}: expected {expected}, got {actual}")]
    TagMismatch {
        key: String,
        expected: Resolved,
        actual: Resolved,
    },

    #[error("Unsupported value type: {value}")]
    UnsupportedValue { value: String },

    #[error(transparent)]
    Descriptor(DescriptorError),
}

impl ValidationError {
    /// Mismatches are the verdict of a check; every other error means the check could not be
    /// carried out.
    pub fn is_mismatch(&self) -> bool {
        matches!(
            self,
            ValidationError::PropertyMismatch { .. }
                | ValidationError::DefaultMismatch { .. }
                | ValidationError::TagMismatch { .. }
        )
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ValidationError::Reference { .. } => "ReferenceError",
            ValidationError::Schema(_) => "SchemaError",
            ValidationError::PropertyMismatch { .. } => "PropertyMismatch",
            ValidationError::DefaultMismatch { .. } => "DefaultMismatch",
            ValidationError::TagMismatch { .. } => "TagMismatch",
            ValidationError::UnsupportedValue { .. } => "TypeError",
            ValidationError::Descriptor(_) => "DescriptorError",
        }
    }
}

impl From<SchemaError> for ValidationError {
    fn from(value: SchemaError) -> Self {
        ValidationError::Schema(value)
    }
}

impl From<DescriptorError> for ValidationError {
    fn from(value: DescriptorError) -> Self {
        match value {
            DescriptorError::Schema(err) => ValidationError::Schema(err),
            err => ValidationError::Descriptor(err),
        }
    }
}
