mod name_utils;
mod type_utils;

pub use name_utils::*;
pub use type_utils::*;
