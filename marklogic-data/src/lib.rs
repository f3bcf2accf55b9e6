//! # MarkLogic Data - object mapping and query building
//!
//! `marklogic_data` maps Rust types to MarkLogic documents and builds the
//! queries a repository layer sends to the server. It does no I/O: every
//! operation turns mapping metadata and caller input into an immutable,
//! inspectable value (a [`Query`](query::Query), an expanded URI, a
//! [`QueryExecution`](repository::QueryExecution)) that an execution layer
//! consumes.
//!
//! ## Key Features
//!
//! - **Mapping metadata**: `#[derive(MarklogicEntity)]` (from the
//!   `marklogic_data_derive` crate) or a hand-written
//!   [`MarklogicEntity`](mapping::MarklogicEntity) impl, cached per type in a
//!   shared [`MappingContext`](mapping::MappingContext)
//! - **Query by example**: populated properties of a probe become a flat
//!   criteria tree
//! - **Sorting and paging**: sort orders resolve to qualified element names
//! - **Collection and URI templates**: `#{id}` and `#{entityClass}` placeholders
//! - **Derived queries**: repository method names such as
//!   `findTop10ByLastnameAndAgeInOrderByAgeDesc` parse into queries
//! - **Named queries**: methods bound to server-side modules
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use marklogic_data::common::{Direction, Sort};
//! use marklogic_data::mapping::MappingContext;
//! use marklogic_data::query::{Example, QueryBuilder};
//!
//! let context = MappingContext::new();
//! let example = Example::of(Person {
//!     lastname: Some("Toussaint".to_string()),
//!     ..Default::default()
//! });
//!
//! let query = QueryBuilder::new(&context)
//!     .alike(&example)
//!     .with_sort(Sort::by(Direction::Descending, &["age"]))
//!     .build()?;
//!
//! assert_eq!(query.collection(), Some("Person"));
//! ```
//!
//! ## Module Organization
//!
//! - [`common`] - Values, qualified names, sort and page requests
//! - [`errors`] - Error types and result definitions
//! - [`mapping`] - Entity metadata and the mapping context
//! - [`query`] - Criteria, sort criteria, templates and the query builder
//! - [`repository`] - Entity information, derived and named repository queries

pub mod common;
pub mod errors;
pub mod mapping;
pub mod query;
pub mod repository;
