//! Mapping metadata: how Rust types map to MarkLogic documents.

mod descriptor;
mod entity;
mod mapping_config;
mod mapping_context;
mod persistent_entity;
mod persistent_property;
mod property_value;

pub use descriptor::*;
pub use entity::*;
pub use mapping_config::*;
pub use mapping_context::*;
pub use persistent_entity::*;
pub use persistent_property::*;
pub use property_value::*;
