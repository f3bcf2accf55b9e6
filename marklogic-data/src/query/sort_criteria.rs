use std::fmt::{Display, Formatter};
use std::sync::Arc;

use crate::common::{QName, Sort};
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{MappingContext, PersistentEntity};

/// One ordering key of a query: element name and direction.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SortCriteria {
    qname: QName,
    descending: bool,
}

impl SortCriteria {
    pub fn new(qname: QName, descending: bool) -> Self {
        SortCriteria { qname, descending }
    }

    pub fn qname(&self) -> &QName {
        &self.qname
    }

    pub fn is_descending(&self) -> bool {
        self.descending
    }
}

impl Display for SortCriteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let direction = if self.descending { "desc" } else { "asc" };
        write!(f, "{} {}", self.qname, direction)
    }
}

/// Resolves every order of `sort` against `entity`, keeping order and
/// direction. Properties may be dotted paths through nested entities.
///
/// # Errors
/// - `LookupError` if a property is unknown
/// - `ConfigurationError` if a property is a nested entity
pub fn build_sort_criteria(
    sort: &Sort,
    entity: &Arc<PersistentEntity>,
    context: &MappingContext,
) -> MarklogicResult<Vec<SortCriteria>> {
    let mut sort_criteria = Vec::with_capacity(sort.orders().len());
    for order in sort {
        let property = context.resolve_property_path(entity, order.property())?;
        if property.is_entity() {
            log::error!("Cannot sort {} by nested entity property '{}'", entity.name(), order.property());
            return Err(MarklogicError::new(
                &format!("Cannot sort {} by nested entity property '{}'", entity.name(), order.property()),
                ErrorKind::ConfigurationError,
            ));
        }
        sort_criteria.push(SortCriteria::new(property.qname().clone(), order.direction().is_descending()));
    }
    Ok(sort_criteria)
}
