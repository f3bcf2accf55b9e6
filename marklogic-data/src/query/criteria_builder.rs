use crate::common::Value;
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{
    MappingContext, MarklogicEntity, PersistentEntity, PersistentProperty, PropertyKind, PropertyValue,
};
use crate::query::Criteria;

/// Builds the criteria tree of a query by example.
///
/// Properties are visited in declaration order. Absent values and empty
/// collections are skipped. A collection becomes an OR of one leaf per
/// element, a nested entity is walked recursively and its constraints join
/// the current conjunction. The first constraint is the running node; later
/// ones are conjoined to it (see [Criteria::conjoin]).
pub struct CriteriaBuilder<'a> {
    context: &'a MappingContext,
}

impl<'a> CriteriaBuilder<'a> {
    pub fn new(context: &'a MappingContext) -> Self {
        CriteriaBuilder { context }
    }

    /// Returns the criteria matching `example`, or `None` if it constrains
    /// nothing.
    ///
    /// # Errors
    /// Accessor errors are returned unchanged; a value whose shape does not
    /// match the property kind is an `AccessorError`.
    pub fn build(
        &self,
        example: &dyn MarklogicEntity,
        entity: &PersistentEntity,
    ) -> MarklogicResult<Option<Criteria>> {
        let mut running: Option<Criteria> = None;

        for property in entity.properties() {
            let value = example.read_property(property.name())?;
            if !value.has_content() {
                continue;
            }

            let node = match self.build_property(property, value, entity)? {
                Some(node) => node,
                None => continue,
            };

            running = Some(match running {
                None => node,
                Some(current) => current.conjoin(node),
            });
        }

        if let Some(criteria) = &running {
            log::trace!("Criteria for example of {}: {}", entity.name(), criteria);
        }
        Ok(running)
    }

    fn build_property(
        &self,
        property: &PersistentProperty,
        value: PropertyValue<'_>,
        entity: &PersistentEntity,
    ) -> MarklogicResult<Option<Criteria>> {
        match (property.kind(), value) {
            (PropertyKind::Entity(nested_type), PropertyValue::Entity(nested)) => {
                let nested_entity = self.context.get_persistent_entity(&nested_type)?;
                self.build(nested, &nested_entity)
            }
            (PropertyKind::Collection, PropertyValue::Collection(values)) => {
                let leaves = values.into_iter().map(|v| property_criteria(property, v)).collect();
                Ok(Criteria::or(leaves))
            }
            (PropertyKind::Scalar, PropertyValue::Scalar(value)) => Ok(Some(property_criteria(property, value))),
            (kind, value) => {
                log::error!(
                    "Property '{}' of {} is declared {:?} but read as {:?}",
                    property.name(),
                    entity.name(),
                    kind,
                    value
                );
                Err(MarklogicError::new(
                    &format!(
                        "Property '{}' of {} is declared {:?} but read as {:?}",
                        property.name(),
                        entity.name(),
                        kind,
                        value
                    ),
                    ErrorKind::AccessorError,
                ))
            }
        }
    }
}

/// Leaf constraining `property` to `value`: a collection leaf for collection
/// selectors, a field equality otherwise.
pub(crate) fn property_criteria(property: &PersistentProperty, value: Value) -> Criteria {
    if property.is_collection_selector() {
        Criteria::collection(value)
    } else {
        Criteria::field(property.qname().clone(), value)
    }
}
