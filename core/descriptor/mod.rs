//! # Descriptor Resolution
//!
//! Turns a `(TypeSchema, physical id)` pair into the flat attribute map of a live resource.
//! The raw describe call is delegated to a `DescriptorClient`; how to dig the resource out of
//! the provider's response envelope is looked up in an `EnvelopeRegistry`.
//!
mod client;
mod envelope;
mod error;
mod resolver;
mod snapshot;

pub use client::*;
pub use envelope::*;
pub use error::*;
pub use resolver::*;
pub use snapshot::*;

/// The flat attribute map of one live resource.
pub type LiveAttributes = serde_json::Map<String, serde_json::Value>;
