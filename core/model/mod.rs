mod declared_value;
mod resolved;
mod symbolic_ref;

pub use declared_value::*;
pub use resolved::*;
pub use symbolic_ref::*;
