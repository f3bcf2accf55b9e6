use std::sync::Arc;

use crate::common::Sort;
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::MappingContext;
use crate::query::{
    build_sort_criteria, property_criteria, resolve_collection, Criteria, ExpressionContext, OperationOptions, Query,
};
use crate::repository::{Parameter, Parameters, Part, PartTree, PartType, QueryMethod, QueryMode, SubjectKind};

/// Query derived from a repository method name.
#[derive(Clone)]
pub struct PartTreeQuery {
    method: QueryMethod,
    tree: Arc<PartTree>,
    context: MappingContext,
}

impl PartTreeQuery {
    /// Parses the method name of `method` against its domain type.
    pub fn new(method: QueryMethod, context: MappingContext) -> MarklogicResult<Self> {
        let entity = context.get_persistent_entity(&method.domain_type())?;
        let tree = PartTree::parse(method.name(), &entity, &context)?;
        Ok(PartTreeQuery {
            method,
            tree: Arc::new(tree),
            context,
        })
    }

    pub fn query_method(&self) -> &QueryMethod {
        &self.method
    }

    pub fn tree(&self) -> &PartTree {
        &self.tree
    }

    /// How the execution layer should run the query.
    pub fn mode(&self) -> QueryMode {
        match self.tree.subject().kind() {
            SubjectKind::Find if self.method.is_collection_query() => QueryMode::FindAll,
            SubjectKind::Find => QueryMode::FindOne,
            SubjectKind::Count => QueryMode::Count,
            SubjectKind::Exists => QueryMode::Exists,
            SubjectKind::Delete => QueryMode::Delete,
        }
    }

    /// Binds `parameters` to the predicate, in order, and builds the query.
    ///
    /// The `OrderBy` clause of the method name wins over a `Sort` argument,
    /// which wins over the sort of a `Pageable` argument. `First`/`Top` caps
    /// the limit.
    ///
    /// # Errors
    /// `ConfigurationError` if the number of parameters does not match the
    /// predicate, a parameter is absent, or a value list is bound to an
    /// equality.
    pub fn create_query(&self, parameters: &Parameters) -> MarklogicResult<Query> {
        let tree = &self.tree;
        let expected = tree.parts().count();
        if parameters.len() != expected {
            log::error!(
                "Method {} expects {} parameters but got {}",
                tree.method_name(),
                expected,
                parameters.len()
            );
            return Err(MarklogicError::new(
                &format!(
                    "Method {} expects {} parameters but got {}",
                    tree.method_name(),
                    expected,
                    parameters.len()
                ),
                ErrorKind::ConfigurationError,
            ));
        }

        let mut values = parameters.values().iter().enumerate();
        let mut or_nodes = Vec::with_capacity(tree.predicate().len());
        for and_parts in tree.predicate() {
            let mut running: Option<Criteria> = None;
            for part in and_parts {
                let (index, parameter) = match values.next() {
                    Some(next) => next,
                    None => break,
                };
                let node = self.bind(part, index, parameter)?;
                running = Some(match running {
                    None => node,
                    Some(current) => current.conjoin(node),
                });
            }
            or_nodes.extend(running);
        }

        let criteria = match or_nodes.len() {
            0 | 1 => or_nodes.pop(),
            _ => Criteria::or(or_nodes),
        };

        let entity = tree.entity();
        let collection = resolve_collection(
            &OperationOptions::new(),
            Some(&**entity),
            &ExpressionContext::for_query(entity),
        )?;

        let sort = [Some(tree.sort()), parameters.sort(), parameters.pageable().and_then(|p| p.sort())]
            .into_iter()
            .flatten()
            .find(|sort| sort.is_sorted())
            .cloned()
            .unwrap_or_else(Sort::unsorted);
        let sort_criteria = build_sort_criteria(&sort, entity, &self.context)?;

        let (skip, mut limit) = match parameters.pageable() {
            Some(pageable) => (Some(pageable.offset()), Some(pageable.page_size())),
            None => (None, None),
        };
        if let Some(max_results) = tree.subject().max_results() {
            limit = Some(limit.map_or(max_results, |limit| limit.min(max_results)));
        }

        let query = Query::new(collection, criteria, sort_criteria, skip, limit);
        log::trace!("Derived {} from {}", query, tree.method_name());
        Ok(query)
    }

    fn bind(&self, part: &Part, index: usize, parameter: &Parameter) -> MarklogicResult<Criteria> {
        let property = part.property();
        match (part.part_type(), parameter) {
            (_, Parameter::Absent) => Err(self.binding_error(format!(
                "Parameter {} of method {} bound to '{}' is absent",
                index,
                self.tree.method_name(),
                part.path()
            ))),
            (_, Parameter::Value(value)) => Ok(property_criteria(property, value.clone())),
            (PartType::AnyOf, Parameter::Values(values)) => {
                let leaves = values.iter().map(|v| property_criteria(property, v.clone())).collect();
                match Criteria::or(leaves) {
                    Some(criteria) => Ok(criteria),
                    None => Err(self.binding_error(format!(
                        "Parameter {} of method {} bound to '{}' has no values",
                        index,
                        self.tree.method_name(),
                        part.path()
                    ))),
                }
            }
            (PartType::Equality, Parameter::Values(_)) => Err(self.binding_error(format!(
                "Parameter {} of method {} bound to '{}' must be a single value",
                index,
                self.tree.method_name(),
                part.path()
            ))),
        }
    }

    fn binding_error(&self, message: String) -> MarklogicError {
        log::error!("{}", message);
        MarklogicError::new(&message, ErrorKind::ConfigurationError)
    }
}
