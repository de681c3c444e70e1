//! # Validation Progress Events
//!
//! Events are self-contained: they carry logical ids and rendered messages instead of
//! references into the stack being validated, so a reporter can print them without holding on
//! to any of the inputs.
//!
mod channel;
mod consumer;
pub mod event;

pub use channel::*;
pub use consumer::*;
pub use event::*;
