//! Common value types shared by the mapping and query modules.

mod qname;
mod sort;
mod util;
mod value;

pub use qname::*;
pub use sort::*;
pub use util::*;
pub use value::*;
