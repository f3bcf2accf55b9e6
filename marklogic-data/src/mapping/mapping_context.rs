use std::any::TypeId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{EntityType, MappingConfig, MarklogicEntity, PersistentEntity, PersistentProperty};

/// Registry of resolved entity metadata.
///
/// # Purpose
/// Turns each mapped type's [EntityDescriptor](crate::mapping::EntityDescriptor)
/// into a [PersistentEntity] exactly once and hands out shared references to it.
///
/// # Characteristics
/// - Cheap to clone: all clones share the same cache
/// - Lookups take a read lock; creation is serialized by a separate mutex so
///   concurrent first use never builds a type twice
/// - In strict mode unknown types fail instead of being registered lazily
#[derive(Clone)]
pub struct MappingContext {
    inner: Arc<MappingContextInner>,
}

impl Default for MappingContext {
    fn default() -> Self {
        Self::new()
    }
}

impl MappingContext {
    /// Creates a lenient context with default configuration.
    pub fn new() -> Self {
        Self::with_config(MappingConfig::default())
    }

    pub fn with_config(config: MappingConfig) -> Self {
        MappingContext {
            inner: Arc::new(MappingContextInner::new(config)),
        }
    }

    pub fn builder() -> MappingContextBuilder {
        MappingContextBuilder::new()
    }

    pub fn config(&self) -> &MappingConfig {
        &self.inner.config
    }

    /// Returns the metadata of `T`, building it if needed.
    ///
    /// # Errors
    /// `LookupError` in strict mode if `T` is not registered; the build errors
    /// of [PersistentEntity] otherwise.
    pub fn persistent_entity<T: MarklogicEntity>(&self) -> MarklogicResult<Arc<PersistentEntity>> {
        self.inner.get_persistent_entity(&EntityType::of::<T>())
    }

    pub fn get_persistent_entity(&self, entity_type: &EntityType) -> MarklogicResult<Arc<PersistentEntity>> {
        self.inner.get_persistent_entity(entity_type)
    }

    /// Registers `T` and every entity type reachable through its nested
    /// entity properties.
    pub fn register<T: MarklogicEntity>(&self) -> MarklogicResult<Arc<PersistentEntity>> {
        self.inner.register_type(&EntityType::of::<T>())
    }

    pub fn register_type(&self, entity_type: &EntityType) -> MarklogicResult<Arc<PersistentEntity>> {
        self.inner.register_type(entity_type)
    }

    pub fn is_registered(&self, entity_type: &EntityType) -> bool {
        self.inner.is_registered(entity_type)
    }

    /// Snapshot of all resolved entities.
    pub fn entities(&self) -> Vec<Arc<PersistentEntity>> {
        self.inner.entities()
    }

    /// Resolves a dotted property path (`address.country`) starting at
    /// `entity`, walking through nested entity properties.
    ///
    /// # Errors
    /// `LookupError` if a segment is unknown, or if an inner segment is not a
    /// nested entity.
    pub fn resolve_property_path(
        &self,
        entity: &Arc<PersistentEntity>,
        path: &str,
    ) -> MarklogicResult<PersistentProperty> {
        self.inner.resolve_property_path(entity, path)
    }
}

struct MappingContextInner {
    config: MappingConfig,
    entities: Atomic<HashMap<TypeId, Arc<PersistentEntity>>>,
    lock: Mutex<()>,
}

impl MappingContextInner {
    fn new(config: MappingConfig) -> Self {
        MappingContextInner {
            config,
            entities: atomic(HashMap::new()),
            lock: Mutex::new(()),
        }
    }

    fn cached(&self, entity_type: &EntityType) -> Option<Arc<PersistentEntity>> {
        self.entities
            .read_with(|entities| entities.get(&entity_type.type_id()).cloned())
    }

    fn get_persistent_entity(&self, entity_type: &EntityType) -> MarklogicResult<Arc<PersistentEntity>> {
        if let Some(entity) = self.cached(entity_type) {
            return Ok(entity);
        }

        if self.config.is_strict() {
            log::error!("No persistent entity information found for type {}", entity_type.type_name());
            return Err(MarklogicError::new(
                &format!(
                    "No persistent entity information found for type {}",
                    entity_type.type_name()
                ),
                ErrorKind::LookupError,
            ));
        }

        let _guard = self.lock.lock();
        self.create_entity(entity_type)
    }

    fn register_type(&self, entity_type: &EntityType) -> MarklogicResult<Arc<PersistentEntity>> {
        let _guard = self.lock.lock();

        // nothing is cached until every nested type resolved
        let root = self.resolve_entity(entity_type)?;
        let mut resolved = vec![root.clone()];
        let mut visited = HashSet::from([entity_type.type_id()]);
        let mut pending: Vec<EntityType> = root.properties().filter_map(|p| p.entity_type()).collect();

        while let Some(nested_type) = pending.pop() {
            if !visited.insert(nested_type.type_id()) {
                continue;
            }
            let nested = self.resolve_entity(&nested_type)?;
            pending.extend(nested.properties().filter_map(|p| p.entity_type()));
            resolved.push(nested);
        }

        self.entities.write_with(|entities| {
            for entity in resolved {
                entities.entry(entity.entity_type().type_id()).or_insert(entity);
            }
        });
        Ok(root)
    }

    // caller holds `lock`
    fn create_entity(&self, entity_type: &EntityType) -> MarklogicResult<Arc<PersistentEntity>> {
        let entity = self.resolve_entity(entity_type)?;
        let entity = self
            .entities
            .write_with(|entities| entities.entry(entity_type.type_id()).or_insert(entity).clone());
        Ok(entity)
    }

    fn resolve_entity(&self, entity_type: &EntityType) -> MarklogicResult<Arc<PersistentEntity>> {
        if let Some(entity) = self.cached(entity_type) {
            return Ok(entity);
        }

        let descriptor = entity_type.descriptor();
        let entity = Arc::new(PersistentEntity::resolve(*entity_type, descriptor, &self.config)?);
        log::debug!(
            "Resolved persistent entity {} as {} with {} properties",
            entity_type.type_name(),
            entity.qname(),
            entity.property_count()
        );
        Ok(entity)
    }

    fn is_registered(&self, entity_type: &EntityType) -> bool {
        self.entities
            .read_with(|entities| entities.contains_key(&entity_type.type_id()))
    }

    fn entities(&self) -> Vec<Arc<PersistentEntity>> {
        self.entities
            .read_with(|entities| entities.values().cloned().collect())
    }

    fn resolve_property_path(
        &self,
        entity: &Arc<PersistentEntity>,
        path: &str,
    ) -> MarklogicResult<PersistentProperty> {
        let mut current = entity.clone();
        let mut segments = path.split('.').peekable();

        while let Some(segment) = segments.next() {
            let property = current.get_persistent_property(segment)?.clone();
            if segments.peek().is_none() {
                return Ok(property);
            }

            match property.entity_type() {
                Some(nested_type) => current = self.get_persistent_entity(&nested_type)?,
                None => {
                    log::error!("Property '{}' of {} is not a nested entity", segment, current.name());
                    return Err(MarklogicError::new(
                        &format!(
                            "Property '{}' of {} is not a nested entity, cannot resolve '{}'",
                            segment,
                            current.name(),
                            path
                        ),
                        ErrorKind::LookupError,
                    ));
                }
            }
        }

        log::error!("Empty property path on entity {}", entity.name());
        Err(MarklogicError::new(
            &format!("Empty property path on entity {}", entity.name()),
            ErrorKind::LookupError,
        ))
    }
}

/// Builder for a [MappingContext].
///
/// Follows the fluent style of the rest of the crate: the first invalid
/// setting is captured and returned by [build](MappingContextBuilder::build).
#[derive(Default)]
pub struct MappingContextBuilder {
    error: Option<MarklogicError>,
    config: MappingConfig,
    entity_types: Vec<EntityType>,
}

impl MappingContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the namespace of entities that do not declare one.
    ///
    /// An empty namespace is rejected; leave it unset for unqualified names.
    pub fn default_namespace(mut self, namespace: &str) -> Self {
        if self.error.is_none() {
            if namespace.trim().is_empty() {
                log::error!("Default namespace cannot be empty");
                self.error = Some(MarklogicError::new(
                    "Default namespace cannot be empty",
                    ErrorKind::ConfigurationError,
                ));
            } else {
                self.config.set_default_namespace(Some(namespace));
            }
        }
        self
    }

    pub fn strict(mut self, strict: bool) -> Self {
        self.config.set_strict(strict);
        self
    }

    /// Registers `T` (and its nested entity types) when the context is built.
    pub fn register<T: MarklogicEntity>(mut self) -> Self {
        self.entity_types.push(EntityType::of::<T>());
        self
    }

    /// Builds the context and registers the requested entity types.
    ///
    /// # Errors
    /// The first error captured by a setter, or the first registration failure.
    pub fn build(self) -> MarklogicResult<MappingContext> {
        if let Some(error) = self.error {
            return Err(error);
        }

        let context = MappingContext::with_config(self.config);
        for entity_type in &self.entity_types {
            context.register_type(entity_type)?;
        }
        Ok(context)
    }
}
