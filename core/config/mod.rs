use crate::events::EventChannel;
use crate::validator::DEFAULT_TAG_PROPERTY;
use std::sync::Arc;
use thiserror::*;

/// A collection of flags and options that affect how a validation run behaves. None of it is
/// specific to one stack.
///
#[derive(Builder, Debug, Clone)]
#[builder(build_fn(error = "ConfigError", validate = "Self::validate_max_workers"))]
pub struct Config {
    /// The maximum number of resources validated at the same time.
    #[builder(default = "self.default_max_workers()")]
    max_workers: usize,

    /// Stop checking a resource at its first mismatch instead of collecting all of them.
    #[builder(default = "true")]
    fail_fast: bool,

    /// The declared property that holds a resource's tags.
    #[builder(setter(into), default = "DEFAULT_TAG_PROPERTY.to_string()")]
    tag_property: String,

    /// The Event Channel used to report progress.
    /// NOTE: this is safe to clone since it is really an [Arc] to a queue.
    #[builder(default = "self.default_event_channel()")]
    event_channel: Arc<EventChannel>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_workers: num_cpus::get(),
            fail_fast: true,
            tag_property: DEFAULT_TAG_PROPERTY.to_string(),
            event_channel: Arc::new(EventChannel::new()),
        }
    }
}

impl Config {
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    pub fn max_workers(&self) -> usize {
        self.max_workers
    }

    pub fn fail_fast(&self) -> bool {
        self.fail_fast
    }

    pub fn tag_property(&self) -> &str {
        self.tag_property.as_ref()
    }

    pub fn event_channel(&self) -> Arc<EventChannel> {
        self.event_channel.clone()
    }
}

impl ConfigBuilder {
    fn default_max_workers(&self) -> usize {
        num_cpus::get()
    }

    fn default_event_channel(&self) -> Arc<EventChannel> {
        EventChannel::new().into()
    }

    fn validate_max_workers(&self) -> Result<(), ConfigError> {
        match self.max_workers {
            Some(0) => Err(ConfigError::NoWorkers),
            _ => Ok(()),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("At least one worker is needed to validate a stack")]
    NoWorkers,

    #[error("Attempted to build a Config struct while missing fields: {0:?}")]
    BuilderError(derive_builder::UninitializedFieldError),
}

impl From<derive_builder::UninitializedFieldError> for ConfigError {
    fn from(err: derive_builder::UninitializedFieldError) -> Self {
        Self::BuilderError(err)
    }
}
