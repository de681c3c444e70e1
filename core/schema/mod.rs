//! # Type Schema Registry
//!
//! One `TypeSchema` per resource type name (`AWS::EC2::Instance`, ...) describes how to fetch a
//! live resource of that type and how to line its attributes up with a declaration. The
//! registry is loaded once and is read-only afterwards; share it behind an `Arc`.
//!
mod error;
mod registry;
mod type_schema;

pub use error::*;
pub use registry::*;
pub use type_schema::*;
