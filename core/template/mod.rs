//! # Declared Templates
//!
//! The expected side of a check: the resources a template declares, with their properties still
//! holding unresolved references.
//!
mod declared_resource;
mod error;

pub use declared_resource::*;
pub use error::*;
