use std::marker::PhantomData;
use std::sync::Arc;

use crate::common::Value;
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{EntityType, MarklogicEntity, PersistentEntity, PropertyValue};
use crate::query::{ExpressionContext, Template};

/// Storage facts about one entity type: where its documents live and how
/// they are identified.
pub trait EntityInformation<T: MarklogicEntity>: Send + Sync {
    fn entity_type(&self) -> EntityType;

    /// URI template documents of this type are stored under.
    fn uri_template(&self) -> &str;

    fn default_collection(&self) -> Option<&str>;

    /// Whether the id element is stored in the property fragment rather than
    /// in the document itself.
    fn id_in_property_fragment(&self) -> bool;

    /// Identifier of `entity`, `None` if it has none yet.
    fn id(&self, entity: &T) -> MarklogicResult<Option<Value>>;

    /// An entity without identifier has never been stored.
    fn is_new(&self, entity: &T) -> MarklogicResult<bool> {
        Ok(self.id(entity)?.is_none())
    }

    /// Expanded URI of `entity`.
    fn uri(&self, entity: &T) -> MarklogicResult<String>;

    /// Expanded default collection of `entity`.
    fn collection(&self, entity: &T) -> MarklogicResult<Option<String>>;
}

/// [EntityInformation] backed by the entity's mapping metadata.
pub struct MappingEntityInformation<T: MarklogicEntity> {
    entity: Arc<PersistentEntity>,
    uri_template: Template,
    collection_template: Option<Template>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T: MarklogicEntity> MappingEntityInformation<T> {
    pub fn new(entity: Arc<PersistentEntity>) -> MarklogicResult<Self> {
        if entity.entity_type() != EntityType::of::<T>() {
            log::error!(
                "Persistent entity {} does not describe type {}",
                entity.name(),
                std::any::type_name::<T>()
            );
            return Err(MarklogicError::new(
                &format!(
                    "Persistent entity {} does not describe type {}",
                    entity.name(),
                    std::any::type_name::<T>()
                ),
                ErrorKind::ConfigurationError,
            ));
        }

        let uri_template = Template::parse(entity.uri_template())?;
        let collection_template = match entity.default_collection() {
            Some(collection) => Some(Template::parse(collection)?),
            None => None,
        };

        Ok(MappingEntityInformation {
            entity,
            uri_template,
            collection_template,
            _phantom: PhantomData,
        })
    }

    pub fn persistent_entity(&self) -> &Arc<PersistentEntity> {
        &self.entity
    }
}

impl<T: MarklogicEntity> EntityInformation<T> for MappingEntityInformation<T> {
    fn entity_type(&self) -> EntityType {
        self.entity.entity_type()
    }

    fn uri_template(&self) -> &str {
        self.uri_template.source()
    }

    fn default_collection(&self) -> Option<&str> {
        self.collection_template.as_ref().map(Template::source)
    }

    fn id_in_property_fragment(&self) -> bool {
        self.entity.id_in_property_fragment()
    }

    fn id(&self, entity: &T) -> MarklogicResult<Option<Value>> {
        let id_property = match self.entity.id_property() {
            Some(id_property) => id_property,
            None => return Ok(None),
        };

        match entity.read_property(id_property.name())? {
            PropertyValue::Scalar(id) => Ok(Some(id)),
            PropertyValue::Absent => Ok(None),
            other => {
                log::error!("Id property '{}' of {} read as {:?}", id_property.name(), self.entity.name(), other);
                Err(MarklogicError::new(
                    &format!(
                        "Id property '{}' of {} did not read as a scalar value",
                        id_property.name(),
                        self.entity.name()
                    ),
                    ErrorKind::AccessorError,
                ))
            }
        }
    }

    fn uri(&self, entity: &T) -> MarklogicResult<String> {
        let instance: &dyn MarklogicEntity = entity;
        let context = ExpressionContext::for_entity(&self.entity, Some(instance));
        self.uri_template.expand(&context)
    }

    fn collection(&self, entity: &T) -> MarklogicResult<Option<String>> {
        match &self.collection_template {
            Some(template) => {
                let instance: &dyn MarklogicEntity = entity;
                let context = ExpressionContext::for_entity(&self.entity, Some(instance));
                template.expand(&context).map(Some)
            }
            None => Ok(None),
        }
    }
}
