//! # Conform
//!
//! Checks that what a deployment template declares is what is actually running.
//!
//! The flow begins by loading a `SchemaRegistry`, a `Template` and a `LiveResourceMap`, and
//! building a `StackValidator` out of a `Config` and a `DescriptorResolver`. The validator walks
//! every declared resource, describes its live counterpart, and checks:
//!
//! * declared properties against live attributes, resolving `Ref`/`Fn::GetAtt` along the way,
//! * schema defaults for attributes the template left out,
//! * declared tags as a subset of the live tags.
//!
//! The result is a `StackReport` with one `Outcome` per resource.
//!

pub(crate) mod config;
pub mod descriptor;
pub(crate) mod drive;
pub mod events;
pub mod model;
pub(crate) mod report;
pub mod schema;
pub mod stack;
pub mod template;
#[cfg(test)]
pub(crate) mod testing;
pub mod validator;

pub use config::*;
pub use drive::*;
pub use report::*;

#[macro_use]
extern crate derive_builder;

#[cfg(test)]
#[macro_use]
extern crate assert_matches;

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;
