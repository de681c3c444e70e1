//! # Resource Assertion Validator
//!
//! Given what a template declares for one resource and what the live resource looks like,
//! decide whether they agree. Declared values may point at other resources (`Ref`, `GetAtt`);
//! those are resolved one property at a time, on demand, against the live resource map of the
//! same deployment.
//!
//! Validation never mutates its inputs, so the same declaration checked against the same live
//! snapshot always yields the same outcome.
//!
mod error;
mod reference;
mod resource;

pub use error::*;
pub use reference::*;
pub use resource::*;
