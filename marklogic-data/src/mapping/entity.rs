use std::any::TypeId;
use std::fmt::{Debug, Formatter};
use std::hash::{Hash, Hasher};

use crate::common::simple_type_name;
use crate::errors::MarklogicResult;
use crate::mapping::{EntityDescriptor, PropertyValue};

/// A Rust type mapped to a MarkLogic document.
///
/// # Purpose
/// Replaces runtime reflection: the type hands out a static metadata table
/// (`describe`) and reads its own properties by name (`read_property`).
/// Implemented by `#[derive(MarklogicEntity)]`; hand-written impls are fine too.
///
/// # Usage
/// ```ignore
/// #[derive(MarklogicEntity)]
/// #[document(collection = "Person", uri = "/contact/person/#{id}.xml", id = "id")]
/// pub struct Person {
///     pub id: Option<String>,
///     pub lastname: Option<String>,
///     #[property(entity)]
///     pub address: Option<Address>,
/// }
/// ```
pub trait MarklogicEntity: Send + Sync + 'static {
    /// Returns the mapping table of this type: names, templates and the
    /// ordered property list.
    fn describe() -> EntityDescriptor
    where
        Self: Sized;

    /// Reads the current value of the property declared as `name`.
    ///
    /// # Errors
    /// `AccessorError` if the type has no readable property with that name.
    fn read_property(&self, name: &str) -> MarklogicResult<PropertyValue<'_>>;

    /// Type handle of the implementing type.
    fn entity_type() -> EntityType
    where
        Self: Sized,
    {
        EntityType::of::<Self>()
    }
}

/// Type-erased handle to a [MarklogicEntity] implementation.
///
/// Nested entity properties and query targets refer to their type through an
/// `EntityType`, which is enough to look up (or lazily build) the cached
/// [PersistentEntity](crate::mapping::PersistentEntity).
#[derive(Clone, Copy)]
pub struct EntityType {
    type_id: TypeId,
    type_name: &'static str,
    describe: fn() -> EntityDescriptor,
}

impl EntityType {
    pub fn of<T: MarklogicEntity>() -> Self {
        EntityType {
            type_id: TypeId::of::<T>(),
            type_name: std::any::type_name::<T>(),
            describe: <T as MarklogicEntity>::describe,
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    /// Fully qualified Rust type name.
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    /// Type name without module path, as exposed to templates by `#{entityClass}`.
    pub fn simple_name(&self) -> &'static str {
        simple_type_name(self.type_name)
    }

    pub fn descriptor(&self) -> EntityDescriptor {
        (self.describe)()
    }
}

impl PartialEq for EntityType {
    fn eq(&self, other: &Self) -> bool {
        self.type_id == other.type_id
    }
}

impl Eq for EntityType {}

impl Hash for EntityType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.type_id.hash(state);
    }
}

impl Debug for EntityType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "EntityType({})", self.type_name)
    }
}
