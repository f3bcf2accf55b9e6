use crate::mapping::{EntityType, MarklogicEntity};

/// Per-call overrides of the query target.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OperationOptions {
    entity_type: Option<EntityType>,
    default_collection: Option<String>,
}

impl OperationOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entity type used to resolve sort properties when the query names no
    /// other target.
    pub fn entity<T: MarklogicEntity>(self) -> Self {
        self.entity_type(EntityType::of::<T>())
    }

    pub fn entity_type(mut self, entity_type: EntityType) -> Self {
        self.entity_type = Some(entity_type);
        self
    }

    /// Collection template that overrides the entity's default collection.
    pub fn default_collection(mut self, collection: &str) -> Self {
        self.default_collection = Some(collection.to_string());
        self
    }

    pub fn get_entity_type(&self) -> Option<EntityType> {
        self.entity_type
    }

    pub fn get_default_collection(&self) -> Option<&str> {
        self.default_collection.as_deref()
    }
}
