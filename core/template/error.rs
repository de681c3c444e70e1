use std::path::PathBuf;
use thiserror::*;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Could not read template at {path:?} due to {err:?}")]
    CouldNotReadTemplate { path: PathBuf, err: std::io::Error },

    #[error("Could not parse template: {0}")]
    ParseError(serde_json::Error),

    #[error("Expected the template to be an object of resources, but found {found}")]
    NotAnObject { found: String },
}

impl From<serde_json::Error> for TemplateError {
    fn from(value: serde_json::Error) -> Self {
        TemplateError::ParseError(value)
    }
}
