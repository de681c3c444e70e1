mod health;
mod schemas;
mod validate;

pub use health::*;
pub use schemas::*;
pub use validate::*;
