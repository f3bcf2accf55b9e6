//! Repository support: entity information, method-name query derivation and
//! named-query lookup.

mod entity_information;
mod parameters;
mod part_tree;
mod part_tree_query;
mod query_lookup;
mod repository_factory;

pub use entity_information::*;
pub use parameters::*;
pub use part_tree::*;
pub use part_tree_query::*;
pub use query_lookup::*;
pub use repository_factory::*;
