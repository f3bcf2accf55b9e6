use std::fmt::{Debug, Formatter};

use crate::common::Value;
use crate::mapping::MarklogicEntity;

/// Value of a property, as read from an instance by its accessor.
///
/// The constructors mirror the shapes a field can have (`T`, `Option<T>`,
/// `Vec<T>`, `Option<Vec<T>>`, nested entity) so generated accessors stay
/// one-liners.
pub enum PropertyValue<'a> {
    /// No value: `None`, or a property the instance does not populate.
    Absent,
    Scalar(Value),
    Collection(Vec<Value>),
    Entity(&'a dyn MarklogicEntity),
}

impl<'a> PropertyValue<'a> {
    pub fn scalar<V: Into<Value>>(value: V) -> Self {
        PropertyValue::Scalar(value.into())
    }

    pub fn optional<V: Clone + Into<Value>>(value: &Option<V>) -> Self {
        match value {
            Some(v) => PropertyValue::Scalar(v.clone().into()),
            None => PropertyValue::Absent,
        }
    }

    pub fn collection<V: Clone + Into<Value>>(values: &[V]) -> Self {
        PropertyValue::Collection(values.iter().cloned().map(Into::into).collect())
    }

    pub fn optional_collection<V: Clone + Into<Value>>(values: &Option<Vec<V>>) -> Self {
        match values {
            Some(v) => PropertyValue::collection(v),
            None => PropertyValue::Absent,
        }
    }

    pub fn entity<E: MarklogicEntity>(entity: &'a E) -> Self {
        PropertyValue::Entity(entity)
    }

    pub fn optional_entity<E: MarklogicEntity>(entity: &'a Option<E>) -> Self {
        match entity {
            Some(e) => PropertyValue::Entity(e),
            None => PropertyValue::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, PropertyValue::Absent)
    }

    /// Whether the value constrains an example query. Absent values and empty
    /// collections do not: they mean "any value", never "no value".
    pub fn has_content(&self) -> bool {
        match self {
            PropertyValue::Absent => false,
            PropertyValue::Collection(values) => !values.is_empty(),
            PropertyValue::Scalar(_) | PropertyValue::Entity(_) => true,
        }
    }

    /// Returns the scalar value, if this is one.
    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            PropertyValue::Scalar(value) => Some(value),
            _ => None,
        }
    }
}

impl Debug for PropertyValue<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PropertyValue::Absent => write!(f, "Absent"),
            PropertyValue::Scalar(value) => write!(f, "Scalar({:?})", value),
            PropertyValue::Collection(values) => write!(f, "Collection({:?})", values),
            PropertyValue::Entity(_) => write!(f, "Entity(..)"),
        }
    }
}
