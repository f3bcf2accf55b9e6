//! Query construction: criteria trees, sort criteria, collection templates
//! and the [QueryBuilder] that ties them together.

mod criteria;
mod criteria_builder;
mod example;
mod operation_options;
mod query;
mod query_builder;
mod sort_criteria;
mod template;

pub use criteria::*;
pub use criteria_builder::*;
pub use example::*;
pub use operation_options::*;
pub use query::*;
pub use query_builder::*;
pub use sort_criteria::*;
pub use template::*;
