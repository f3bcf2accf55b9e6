use std::fmt::{Display, Formatter};

use crate::common::Value;
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{MarklogicEntity, PersistentEntity, PropertyValue};
use crate::query::OperationOptions;

const PLACEHOLDER_START: &str = "#{";
const PLACEHOLDER_END: char = '}';

/// Piece of a parsed [Template].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSegment {
    Text(String),
    Id,
    EntityClass,
}

/// A collection or URI template.
///
/// Templates without placeholders are literals and are returned verbatim,
/// never evaluated. Recognised placeholders are `#{id}` (identifier of the
/// entity instance) and `#{entityClass}` (simple name of the entity type).
///
/// ```text
/// "Person"                     -> literal
/// "/contact/person/#{id}.xml"  -> expression, "/contact/person/42.xml" for id 42
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Template {
    Literal(String),
    Expression {
        source: String,
        segments: Vec<TemplateSegment>,
    },
}

impl Template {
    /// Parses `source`.
    ///
    /// # Errors
    /// `ExpressionError` for an unterminated `#{` or an unknown placeholder.
    pub fn parse(source: &str) -> MarklogicResult<Template> {
        if !source.contains(PLACEHOLDER_START) {
            return Ok(Template::Literal(source.to_string()));
        }

        let mut segments = Vec::new();
        let mut rest = source;
        while let Some(start) = rest.find(PLACEHOLDER_START) {
            if start > 0 {
                segments.push(TemplateSegment::Text(rest[..start].to_string()));
            }

            let after = &rest[start + PLACEHOLDER_START.len()..];
            let end = match after.find(PLACEHOLDER_END) {
                Some(end) => end,
                None => {
                    log::error!("Unterminated placeholder in template '{}'", source);
                    return Err(MarklogicError::new(
                        &format!("Unterminated placeholder in template '{}'", source),
                        ErrorKind::ExpressionError,
                    ));
                }
            };

            let segment = match after[..end].trim() {
                "id" => TemplateSegment::Id,
                "entityClass" => TemplateSegment::EntityClass,
                other => {
                    log::error!("Unknown placeholder '#{{{}}}' in template '{}'", other, source);
                    return Err(MarklogicError::new(
                        &format!("Unknown placeholder '#{{{}}}' in template '{}'", other, source),
                        ErrorKind::ExpressionError,
                    ));
                }
            };
            segments.push(segment);
            rest = &after[end + 1..];
        }

        if !rest.is_empty() {
            segments.push(TemplateSegment::Text(rest.to_string()));
        }

        Ok(Template::Expression {
            source: source.to_string(),
            segments,
        })
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Template::Literal(_))
    }

    /// The template text as written.
    pub fn source(&self) -> &str {
        match self {
            Template::Literal(source) => source,
            Template::Expression { source, .. } => source,
        }
    }

    /// Expands the template against `context`.
    ///
    /// A placeholder without a value expands to an empty string in a
    /// [query-time](ExpressionContext::query_time) context.
    ///
    /// # Errors
    /// - `ExpressionError` if a placeholder has no value in a strict context
    /// - `AccessorError` from reading the id off the entity instance
    pub fn expand(&self, context: &ExpressionContext<'_>) -> MarklogicResult<String> {
        let segments = match self {
            Template::Literal(source) => return Ok(source.clone()),
            Template::Expression { segments, .. } => segments,
        };

        let mut expanded = String::new();
        for segment in segments {
            match segment {
                TemplateSegment::Text(text) => expanded.push_str(text),
                TemplateSegment::EntityClass => match context.entity_class {
                    Some(entity_class) => expanded.push_str(entity_class),
                    None if context.query_time => {}
                    None => return Err(self.missing_value("entityClass")),
                },
                TemplateSegment::Id => match context.resolve_id()? {
                    Some(id) => expanded.push_str(&id.to_string()),
                    None if context.query_time => {}
                    None => return Err(self.missing_value("id")),
                },
            }
        }
        Ok(expanded)
    }

    fn missing_value(&self, placeholder: &str) -> MarklogicError {
        log::error!("No value for '#{{{}}}' in template '{}'", placeholder, self.source());
        MarklogicError::new(
            &format!("No value for '#{{{}}}' in template '{}'", placeholder, self.source()),
            ErrorKind::ExpressionError,
        )
    }
}

impl Display for Template {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.source())
    }
}

/// Values available to placeholders while a template expands.
///
/// The id is taken from `id` when set, otherwise read from the entity
/// instance through its id property.
///
/// A query is built before any document exists, so a query-time context
/// has no instance and expands missing placeholders to nothing.
#[derive(Default, Clone)]
pub struct ExpressionContext<'a> {
    entity_class: Option<&'a str>,
    entity: Option<&'a dyn MarklogicEntity>,
    id_property: Option<&'a str>,
    id: Option<Value>,
    query_time: bool,
}

impl<'a> ExpressionContext<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context for `entity`, optionally bound to one of its instances.
    pub fn for_entity(entity: &'a PersistentEntity, instance: Option<&'a dyn MarklogicEntity>) -> Self {
        ExpressionContext {
            entity_class: Some(entity.name()),
            entity: instance,
            id_property: entity.id_property().map(|p| p.name()),
            id: None,
            query_time: false,
        }
    }

    /// Context for a query against `entity`, with no instance bound.
    pub fn for_query(entity: &'a PersistentEntity) -> Self {
        Self::for_entity(entity, None).query_time()
    }

    pub fn query_time(mut self) -> Self {
        self.query_time = true;
        self
    }

    pub fn entity_class(mut self, entity_class: &'a str) -> Self {
        self.entity_class = Some(entity_class);
        self
    }

    pub fn entity(mut self, entity: &'a dyn MarklogicEntity, id_property: &'a str) -> Self {
        self.entity = Some(entity);
        self.id_property = Some(id_property);
        self
    }

    pub fn id<V: Into<Value>>(mut self, id: V) -> Self {
        self.id = Some(id.into());
        self
    }

    fn resolve_id(&self) -> MarklogicResult<Option<Value>> {
        if let Some(id) = &self.id {
            return Ok(Some(id.clone()));
        }

        match (self.entity, self.id_property) {
            (Some(entity), Some(id_property)) => match entity.read_property(id_property)? {
                PropertyValue::Scalar(id) => Ok(Some(id)),
                PropertyValue::Absent => Ok(None),
                other => {
                    log::error!("Id property '{}' did not read as a scalar: {:?}", id_property, other);
                    Err(MarklogicError::new(
                        &format!("Id property '{}' did not read as a scalar value", id_property),
                        ErrorKind::AccessorError,
                    ))
                }
            },
            _ => Ok(None),
        }
    }
}

/// Resolves the collection a query or a document targets.
///
/// Priority: the collection in `options`, then the default collection of
/// `target`. Templates with placeholders are expanded against `context`.
/// Returns `None` when neither is set.
pub fn resolve_collection(
    options: &OperationOptions,
    target: Option<&PersistentEntity>,
    context: &ExpressionContext<'_>,
) -> MarklogicResult<Option<String>> {
    let template = options
        .get_default_collection()
        .or_else(|| target.and_then(|entity| entity.default_collection()));

    match template {
        Some(template) => Template::parse(template)?.expand(context).map(Some),
        None => Ok(None),
    }
}
