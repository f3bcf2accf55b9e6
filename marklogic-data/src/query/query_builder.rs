use crate::common::{Pageable, Sort};
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{EntityType, MappingContext, MarklogicEntity};
use crate::query::{
    build_sort_criteria, resolve_collection, CriteriaBuilder, Example, ExpressionContext, OperationOptions, Query,
};

#[derive(Default)]
struct QueryDefinition<'a> {
    entity_type: Option<EntityType>,
    example: Option<(&'a dyn MarklogicEntity, EntityType)>,
    sort: Option<Sort>,
    pageable: Option<Pageable>,
    options: OperationOptions,
}

/// Assembles a [Query] from a type or an example, a sort, a page request and
/// per-call options.
///
/// Setters only record the request; everything is validated and resolved
/// once, by [build](QueryBuilder::build), which consumes the builder.
///
/// # Examples
///
/// ```rust,ignore
/// let example = Example::of(Person { lastname: Some("Toussaint".into()), ..Default::default() });
/// let query = QueryBuilder::new(&context)
///     .alike(&example)
///     .with_sort(Sort::by(Direction::Descending, &["age"]))
///     .build()?;
/// ```
pub struct QueryBuilder<'a> {
    context: &'a MappingContext,
    definition: QueryDefinition<'a>,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(context: &'a MappingContext) -> Self {
        QueryBuilder {
            context,
            definition: QueryDefinition::default(),
        }
    }

    /// Queries every document of the given type.
    pub fn of_type(mut self, entity_type: EntityType) -> Self {
        self.definition.entity_type = Some(entity_type);
        self
    }

    pub fn of<T: MarklogicEntity>(self) -> Self {
        self.of_type(EntityType::of::<T>())
    }

    /// Queries documents matching the populated properties of the probe.
    pub fn alike<T: MarklogicEntity>(mut self, example: &'a Example<T>) -> Self {
        let probe: &'a dyn MarklogicEntity = example.probe();
        self.definition.example = Some((probe, example.probe_type()));
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.definition.sort = Some(sort);
        self
    }

    /// Restricts the query to one page. The page's sort applies only when no
    /// explicit sort is set.
    pub fn with_pageable(mut self, pageable: Pageable) -> Self {
        self.definition.pageable = Some(pageable);
        self
    }

    pub fn options(mut self, options: OperationOptions) -> Self {
        self.definition.options = options;
        self
    }

    /// Validates the request and builds the query.
    ///
    /// # Errors
    /// - `ConfigurationError` if both a type and an example are set, or if a
    ///   sort is requested without any type to resolve it against
    /// - `LookupError` for an unknown sort property or unmapped type
    /// - `ExpressionError` if the collection template cannot be expanded
    /// - accessor errors of the example probe, unchanged
    pub fn build(self) -> MarklogicResult<Query> {
        let context = self.context;
        let QueryDefinition {
            entity_type,
            example,
            sort,
            pageable,
            options,
        } = self.definition;

        if entity_type.is_some() && example.is_some() {
            log::error!("Query by example or by type are mutually exclusive");
            return Err(MarklogicError::new(
                "Query by example or by type are mutually exclusive",
                ErrorKind::ConfigurationError,
            ));
        }
        let example_type = example.map(|(_, probe_type)| probe_type);

        let collection_type = options.get_entity_type().or(example_type).or(entity_type);
        let collection = target_collection(context, collection_type, &options)?;

        let criteria = match example {
            Some((probe, probe_type)) => {
                let entity = context.get_persistent_entity(&probe_type)?;
                CriteriaBuilder::new(context).build(probe, &entity)?
            }
            None => None,
        };

        let sort = sort.or_else(|| pageable.as_ref().and_then(|p| p.sort().cloned()));
        let sort_criteria = match sort {
            Some(sort) if sort.is_sorted() => {
                let sort_type = match example_type.or(entity_type).or(options.get_entity_type()) {
                    Some(sort_type) => sort_type,
                    None => {
                        log::error!("Query needs an explicit type to resolve sort order");
                        return Err(MarklogicError::new(
                            "Query needs an explicit type to resolve sort order",
                            ErrorKind::ConfigurationError,
                        ));
                    }
                };
                let entity = context.get_persistent_entity(&sort_type)?;
                build_sort_criteria(&sort, &entity, context)?
            }
            _ => Vec::new(),
        };

        let (skip, limit) = match &pageable {
            Some(pageable) => (Some(pageable.offset()), Some(pageable.page_size())),
            None => (None, None),
        };

        let query = Query::new(collection, criteria, sort_criteria, skip, limit);
        log::trace!("Built {}", query);
        Ok(query)
    }
}

fn target_collection(
    context: &MappingContext,
    target_type: Option<EntityType>,
    options: &OperationOptions,
) -> MarklogicResult<Option<String>> {
    if options.get_default_collection().is_some() {
        let expression = match target_type {
            Some(target_type) => ExpressionContext::new().entity_class(target_type.simple_name()),
            None => ExpressionContext::new(),
        }
        .query_time();
        return resolve_collection(options, None, &expression);
    }

    match target_type {
        Some(target_type) => {
            let entity = context.get_persistent_entity(&target_type)?;
            resolve_collection(options, Some(&*entity), &ExpressionContext::for_query(&entity))
        }
        None => Ok(None),
    }
}
