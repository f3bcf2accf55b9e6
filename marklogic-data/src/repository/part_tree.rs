use std::fmt::{Display, Formatter};
use std::sync::{Arc, LazyLock};

use itertools::Itertools;
use regex::Regex;

use crate::common::{camel_case_boundaries, decapitalize, Direction, Order, Sort};
use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{MappingContext, PersistentEntity, PersistentProperty};

static METHOD_NAME_PATTERN: LazyLock<Result<Regex, regex::Error>> = LazyLock::new(|| {
    Regex::new(r"^(find|read|get|query|search|stream|count|exists|delete|remove)((?:\p{Lu}\w*?)??)(?:By(\p{Lu}\w*))?$")
});

static LIMIT_PATTERN: LazyLock<Result<Regex, regex::Error>> =
    LazyLock::new(|| Regex::new(r"(First|Top)(\d*)(?:\p{Lu}|$)"));

const ORDER_BY: &str = "OrderBy";
const OR: &str = "Or";
const AND: &str = "And";
const ASC: &str = "Asc";
const DESC: &str = "Desc";

const EQUALITY_KEYWORDS: &[&str] = &["Is", "Equals"];
const ANY_OF_KEYWORDS: &[&str] = &["In", "IsIn"];
const UNSUPPORTED_KEYWORDS: &[&str] = &[
    "Between", "IsBetween",
    "LessThan", "IsLessThan", "LessThanEqual", "IsLessThanEqual",
    "GreaterThan", "IsGreaterThan", "GreaterThanEqual", "IsGreaterThanEqual",
    "Before", "IsBefore", "After", "IsAfter",
    "Null", "IsNull", "NotNull", "IsNotNull",
    "Empty", "IsEmpty", "NotEmpty", "IsNotEmpty",
    "Like", "IsLike", "NotLike", "IsNotLike",
    "StartingWith", "IsStartingWith", "StartsWith",
    "EndingWith", "IsEndingWith", "EndsWith",
    "Containing", "IsContaining", "Contains",
    "NotContaining", "IsNotContaining", "NotContains",
    "NotIn", "IsNotIn", "Not", "IsNot",
    "Near", "IsNear", "Within", "IsWithin",
    "Regex", "MatchesRegex", "Matches", "Exists",
    "True", "IsTrue", "False", "IsFalse",
    "IgnoreCase", "IgnoringCase", "AllIgnoreCase", "AllIgnoringCase",
];

fn pattern(lock: &'static LazyLock<Result<Regex, regex::Error>>) -> MarklogicResult<&'static Regex> {
    match LazyLock::force(lock) {
        Ok(regex) => Ok(regex),
        Err(e) => {
            log::error!("Invalid method name pattern: {}", e);
            Err(MarklogicError::from(e.clone()))
        }
    }
}

/// What a derived query does with the matching documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubjectKind {
    Find,
    Count,
    Exists,
    Delete,
}

/// Subject of a method name: the part between the verb and `By`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    kind: SubjectKind,
    distinct: bool,
    max_results: Option<u64>,
}

impl Subject {
    fn parse(verb: &str, subject: &str, method_name: &str) -> MarklogicResult<Subject> {
        let kind = match verb {
            "count" => SubjectKind::Count,
            "exists" => SubjectKind::Exists,
            "delete" | "remove" => SubjectKind::Delete,
            _ => SubjectKind::Find,
        };

        let max_results = match pattern(&LIMIT_PATTERN)?.captures(subject) {
            Some(captures) => {
                let digits = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
                if digits.is_empty() {
                    Some(1)
                } else {
                    match digits.parse::<u64>() {
                        Ok(limit) => Some(limit),
                        Err(e) => {
                            log::error!("Invalid result limit '{}' in method name {}: {}", digits, method_name, e);
                            return Err(MarklogicError::new(
                                &format!("Invalid result limit '{}' in method name {}", digits, method_name),
                                ErrorKind::QueryDerivationError,
                            ));
                        }
                    }
                }
            }
            None => None,
        };

        Ok(Subject {
            kind,
            distinct: subject.contains("Distinct"),
            max_results,
        })
    }

    pub fn kind(&self) -> SubjectKind {
        self.kind
    }

    pub fn is_distinct(&self) -> bool {
        self.distinct
    }

    /// Result cap from `First`/`Top`, if any.
    pub fn max_results(&self) -> Option<u64> {
        self.max_results
    }
}

/// How a predicate part compares its property with the bound parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PartType {
    /// Property equals the parameter.
    Equality,
    /// Property equals any of the parameter's values.
    AnyOf,
}

/// One comparison of a method name predicate, such as `LastnameIn`.
#[derive(Debug, Clone, PartialEq)]
pub struct Part {
    path: String,
    property: PersistentProperty,
    part_type: PartType,
}

impl Part {
    /// Dotted property path from the domain type (`address.country`).
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The leaf property the path ends at.
    pub fn property(&self) -> &PersistentProperty {
        &self.property
    }

    pub fn part_type(&self) -> PartType {
        self.part_type
    }
}

impl Display for Part {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.part_type {
            PartType::Equality => write!(f, "{} = ?", self.path),
            PartType::AnyOf => write!(f, "{} in ?", self.path),
        }
    }
}

/// A parsed repository method name, such as
/// `findTop10ByLastnameAndAddressCountryOrderByAgeDesc`.
///
/// The predicate is held in disjunctive normal form: a list of OR-parts, each
/// a list of AND-ed [Part]s. Property paths are resolved against the domain
/// entity while parsing, so an invalid name fails early.
#[derive(Debug, Clone)]
pub struct PartTree {
    method_name: String,
    entity: Arc<PersistentEntity>,
    subject: Subject,
    predicate: Vec<Vec<Part>>,
    sort: Sort,
}

impl PartTree {
    /// Parses `method_name` against `entity`.
    ///
    /// # Errors
    /// - `QueryDerivationError` if the name does not follow the method naming
    ///   rules or uses an unsupported keyword
    /// - `LookupError` if a property path does not exist on the entity
    pub fn parse(
        method_name: &str,
        entity: &Arc<PersistentEntity>,
        context: &MappingContext,
    ) -> MarklogicResult<PartTree> {
        let captures = match pattern(&METHOD_NAME_PATTERN)?.captures(method_name) {
            Some(captures) => captures,
            None => {
                log::error!("Method name {} cannot be turned into a query", method_name);
                return Err(MarklogicError::new(
                    &format!("Method name {} cannot be turned into a query", method_name),
                    ErrorKind::QueryDerivationError,
                ));
            }
        };

        let verb = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        let subject = captures.get(2).map(|m| m.as_str()).unwrap_or_default();
        let subject = Subject::parse(verb, subject, method_name)?;

        let (predicate_source, order_source) = match captures.get(3) {
            Some(predicate) => split_order_by(predicate.as_str()),
            None => ("", None),
        };

        let mut predicate = Vec::new();
        if !predicate_source.is_empty() {
            for or_source in split_keyword(predicate_source, OR) {
                let mut and_parts = Vec::new();
                for part_source in split_keyword(or_source, AND) {
                    and_parts.push(parse_part(part_source, method_name, entity, context)?);
                }
                predicate.push(and_parts);
            }
        }

        let sort = match order_source {
            Some(order_source) => parse_order_by(order_source, method_name, entity, context)?,
            None => Sort::unsorted(),
        };

        let tree = PartTree {
            method_name: method_name.to_string(),
            entity: entity.clone(),
            subject,
            predicate,
            sort,
        };
        log::debug!("Parsed method {} on {}: {}", method_name, entity.name(), tree);
        Ok(tree)
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn entity(&self) -> &Arc<PersistentEntity> {
        &self.entity
    }

    pub fn subject(&self) -> &Subject {
        &self.subject
    }

    /// OR-parts, each a list of AND-ed parts. Empty when the method has no
    /// `By` clause.
    pub fn predicate(&self) -> &[Vec<Part>] {
        &self.predicate
    }

    /// Parts in parameter binding order.
    pub fn parts(&self) -> impl Iterator<Item = &Part> {
        self.predicate.iter().flatten()
    }

    /// Static order from an `OrderBy` clause; unsorted if there is none.
    pub fn sort(&self) -> &Sort {
        &self.sort
    }
}

impl Display for PartTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let predicate = self
            .predicate
            .iter()
            .map(|and_parts| and_parts.iter().join(" && "))
            .join(" || ");
        write!(f, "{:?} [{}]", self.subject.kind, predicate)?;
        if self.sort.is_sorted() {
            let orders = self
                .sort
                .iter()
                .map(|o| format!("{} {}", o.property(), if o.is_ascending() { "asc" } else { "desc" }))
                .join(", ");
            write!(f, " order by {}", orders)?;
        }
        Ok(())
    }
}

/// Index of the first `keyword` in `source` that starts a new camel-case word
/// and is followed by one, searching from `from`.
fn find_keyword(source: &str, keyword: &str, from: usize) -> Option<usize> {
    let mut start = from;
    while let Some(offset) = source[start..].find(keyword) {
        let index = start + offset;
        let next = source[index + keyword.len()..].chars().next();
        if index > 0 && next.is_some_and(char::is_uppercase) {
            return Some(index);
        }
        start = index + keyword.len();
    }
    None
}

fn split_keyword<'s>(source: &'s str, keyword: &str) -> Vec<&'s str> {
    let mut parts = Vec::new();
    let mut rest = source;
    while let Some(index) = find_keyword(rest, keyword, 0) {
        parts.push(&rest[..index]);
        rest = &rest[index + keyword.len()..];
    }
    parts.push(rest);
    parts
}

fn split_order_by(source: &str) -> (&str, Option<&str>) {
    // `OrderBy` may open the whole clause (`findAllByOrderByAge` has no predicate)
    if let Some(order) = source.strip_prefix(ORDER_BY) {
        if order.chars().next().is_some_and(char::is_uppercase) {
            return ("", Some(order));
        }
    }

    match find_keyword(source, ORDER_BY, 0) {
        Some(index) => (&source[..index], Some(&source[index + ORDER_BY.len()..])),
        None => (source, None),
    }
}

fn unsupported(message: String) -> MarklogicError {
    log::error!("{}", message);
    MarklogicError::new(&message, ErrorKind::QueryDerivationError)
}

fn parse_part(
    source: &str,
    method_name: &str,
    entity: &Arc<PersistentEntity>,
    context: &MappingContext,
) -> MarklogicResult<Part> {
    if source.is_empty() {
        return Err(unsupported(format!("Empty predicate part in method name {}", method_name)));
    }

    let keyword = EQUALITY_KEYWORDS
        .iter()
        .chain(ANY_OF_KEYWORDS)
        .chain(UNSUPPORTED_KEYWORDS)
        .filter(|keyword| source.len() > keyword.len() && source.ends_with(*keyword))
        .max_by_key(|keyword| keyword.len());

    let (property_source, part_type) = match keyword {
        Some(keyword) if EQUALITY_KEYWORDS.contains(keyword) => {
            (&source[..source.len() - keyword.len()], PartType::Equality)
        }
        Some(keyword) if ANY_OF_KEYWORDS.contains(keyword) => {
            (&source[..source.len() - keyword.len()], PartType::AnyOf)
        }
        Some(keyword) => {
            return Err(unsupported(format!(
                "Keyword '{}' in method name {} is not supported",
                keyword, method_name
            )))
        }
        None => (source, PartType::Equality),
    };

    let (path, property) = resolve_path(property_source, method_name, entity, context)?;
    if property.is_entity() {
        return Err(unsupported(format!(
            "Property path '{}' in method name {} ends at a nested entity",
            path, method_name
        )));
    }

    Ok(Part {
        path,
        property,
        part_type,
    })
}

fn parse_order_by(
    source: &str,
    method_name: &str,
    entity: &Arc<PersistentEntity>,
    context: &MappingContext,
) -> MarklogicResult<Sort> {
    let mut orders = Vec::new();
    let mut rest = source;

    while !rest.is_empty() {
        let direction_at = [(ASC, Direction::Ascending), (DESC, Direction::Descending)]
            .into_iter()
            .filter_map(|(keyword, direction)| {
                let mut from = 1;
                while let Some(offset) = rest.get(from..).and_then(|r| r.find(keyword)) {
                    let index = from + offset;
                    let next = rest[index + keyword.len()..].chars().next();
                    if next.is_none() || next.is_some_and(char::is_uppercase) {
                        return Some((index, keyword.len(), direction));
                    }
                    from = index + 1;
                }
                None
            })
            .min_by_key(|(index, _, _)| *index);

        let (property_source, direction) = match direction_at {
            Some((index, length, direction)) => {
                let property_source = &rest[..index];
                rest = &rest[index + length..];
                (property_source, direction)
            }
            None => {
                let property_source = rest;
                rest = "";
                (property_source, Direction::Ascending)
            }
        };

        let (path, _) = resolve_path(property_source, method_name, entity, context)?;
        orders.push(Order::new(&path, direction));
    }

    if orders.is_empty() {
        return Err(unsupported(format!("Empty OrderBy clause in method name {}", method_name)));
    }
    Ok(Sort::by_orders(orders))
}

/// Resolves a camel-case property path (`AddressCountry`, `Address_Country`)
/// to a dotted path and its leaf property.
fn resolve_path(
    source: &str,
    method_name: &str,
    entity: &Arc<PersistentEntity>,
    context: &MappingContext,
) -> MarklogicResult<(String, PersistentProperty)> {
    let mut current = entity.clone();
    let mut chain: Vec<PersistentProperty> = Vec::new();

    for segment in source.split('_') {
        if let Some(previous) = chain.last() {
            match previous.entity_type() {
                Some(nested_type) => current = context.get_persistent_entity(&nested_type)?,
                None => return Err(unknown_path(source, method_name, entity)),
            }
        }

        match resolve_segment(segment, &current, context)? {
            Some(properties) => chain.extend(properties),
            None => return Err(unknown_path(source, method_name, entity)),
        }
    }

    match chain.last() {
        Some(leaf) => {
            let path = chain.iter().map(PersistentProperty::name).join(".");
            Ok((path, leaf.clone()))
        }
        None => Err(unknown_path(source, method_name, entity)),
    }
}

fn resolve_segment(
    segment: &str,
    entity: &Arc<PersistentEntity>,
    context: &MappingContext,
) -> MarklogicResult<Option<Vec<PersistentProperty>>> {
    if segment.is_empty() {
        return Ok(None);
    }

    if let Some(property) = entity.find_property(&decapitalize(segment)) {
        return Ok(Some(vec![property.clone()]));
    }

    // longest head first
    for split in camel_case_boundaries(segment).into_iter().rev() {
        let (head, tail) = segment.split_at(split);
        let property = match entity.find_property(&decapitalize(head)) {
            Some(property) => property,
            None => continue,
        };
        let nested_type = match property.entity_type() {
            Some(nested_type) => nested_type,
            None => continue,
        };

        let nested = context.get_persistent_entity(&nested_type)?;
        if let Some(mut rest) = resolve_segment(tail, &nested, context)? {
            rest.insert(0, property.clone());
            return Ok(Some(rest));
        }
    }
    Ok(None)
}

fn unknown_path(source: &str, method_name: &str, entity: &PersistentEntity) -> MarklogicError {
    log::error!("No property path '{}' found on {} for method {}", source, entity.name(), method_name);
    MarklogicError::new(
        &format!(
            "No property path '{}' found on entity {} for method {}",
            source,
            entity.name(),
            method_name
        ),
        ErrorKind::LookupError,
    )
}
