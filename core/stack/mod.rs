//! # Live Stack Introspection
//!
//! What a deployment looks like right now: which physical resource backs each logical id, and
//! whether the stack settled without failures.
//!
mod error;
mod health;
mod live_resources;

pub use error::*;
pub use health::*;
pub use live_resources::*;
