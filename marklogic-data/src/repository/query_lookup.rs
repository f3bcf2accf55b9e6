use indexmap::IndexMap;

use crate::errors::{ErrorKind, MarklogicError, MarklogicResult};
use crate::mapping::{EntityType, MappingContext};
use crate::query::Query;
use crate::repository::{Parameter, Parameters, PartTreeQuery};

/// Server-side modules implementing repository methods, keyed by
/// `"<Entity>.<method>"`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NamedQueries {
    queries: IndexMap<String, String>,
}

impl NamedQueries {
    pub fn new() -> Self {
        NamedQueries::default()
    }

    /// Maps the query `name` to the module at `module_uri`.
    pub fn add(mut self, name: &str, module_uri: &str) -> Self {
        self.queries.insert(name.to_string(), module_uri.to_string());
        self
    }

    pub fn has_query(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    pub fn get_query(&self, name: &str) -> Option<&str> {
        self.queries.get(name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.queries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries.is_empty()
    }
}

/// A repository method as seen by query lookup: its name, the domain type of
/// its repository and its declared parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryMethod {
    name: String,
    domain_type: EntityType,
    parameter_names: Vec<String>,
    returns_collection: bool,
}

impl QueryMethod {
    pub fn new(name: &str, domain_type: EntityType) -> Self {
        QueryMethod {
            name: name.to_string(),
            domain_type,
            parameter_names: Vec::new(),
            returns_collection: false,
        }
    }

    pub fn parameter(mut self, name: &str) -> Self {
        self.parameter_names.push(name.to_string());
        self
    }

    pub fn parameters(mut self, names: &[&str]) -> Self {
        self.parameter_names.extend(names.iter().map(|name| name.to_string()));
        self
    }

    /// Marks the method as returning many results.
    pub fn returns_collection(mut self, returns_collection: bool) -> Self {
        self.returns_collection = returns_collection;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain_type(&self) -> EntityType {
        self.domain_type
    }

    pub fn parameter_names(&self) -> &[String] {
        &self.parameter_names
    }

    pub fn is_collection_query(&self) -> bool {
        self.returns_collection
    }

    /// Key of this method in [NamedQueries], e.g. `Person.findByLastname`.
    pub fn named_query_name(&self) -> String {
        format!("{}.{}", self.domain_type.simple_name(), self.name)
    }
}

/// How a derived search is executed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum QueryMode {
    FindOne,
    FindAll,
    Count,
    Exists,
    Delete,
}

/// Work handed to the execution layer for one repository method call.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryExecution {
    Search {
        query: Query,
        mode: QueryMode,
    },
    InvokeModule {
        module_uri: String,
        params: IndexMap<String, Parameter>,
        as_list: bool,
    },
}

/// Repository method bound to a server-side module.
#[derive(Debug, Clone)]
pub struct ModuleInvokeQuery {
    module_uri: String,
    method: QueryMethod,
}

impl ModuleInvokeQuery {
    pub fn new(module_uri: &str, method: QueryMethod) -> Self {
        ModuleInvokeQuery {
            module_uri: module_uri.to_string(),
            method,
        }
    }

    pub fn module_uri(&self) -> &str {
        &self.module_uri
    }

    pub fn query_method(&self) -> &QueryMethod {
        &self.method
    }

    /// Pairs the call arguments with the declared parameter names.
    ///
    /// # Errors
    /// `ConfigurationError` if the counts differ.
    pub fn prepare(&self, parameters: &Parameters) -> MarklogicResult<QueryExecution> {
        let names = self.method.parameter_names();
        if names.len() != parameters.len() {
            log::error!(
                "Module {} for method {} declares {} parameters but got {}",
                self.module_uri,
                self.method.name(),
                names.len(),
                parameters.len()
            );
            return Err(MarklogicError::new(
                &format!(
                    "Module {} for method {} declares {} parameters but got {}",
                    self.module_uri,
                    self.method.name(),
                    names.len(),
                    parameters.len()
                ),
                ErrorKind::ConfigurationError,
            ));
        }

        let params = names
            .iter()
            .cloned()
            .zip(parameters.values().iter().cloned())
            .collect();
        Ok(QueryExecution::InvokeModule {
            module_uri: self.module_uri.clone(),
            params,
            as_list: self.method.is_collection_query(),
        })
    }
}

/// A resolved repository method.
#[derive(Clone)]
pub enum RepositoryQuery {
    PartTree(PartTreeQuery),
    ModuleInvoke(ModuleInvokeQuery),
}

impl RepositoryQuery {
    pub fn query_method(&self) -> &QueryMethod {
        match self {
            RepositoryQuery::PartTree(query) => query.query_method(),
            RepositoryQuery::ModuleInvoke(query) => query.query_method(),
        }
    }

    /// Binds the call arguments and returns what the execution layer runs.
    pub fn prepare(&self, parameters: &Parameters) -> MarklogicResult<QueryExecution> {
        match self {
            RepositoryQuery::PartTree(query) => Ok(QueryExecution::Search {
                query: query.create_query(parameters)?,
                mode: query.mode(),
            }),
            RepositoryQuery::ModuleInvoke(query) => query.prepare(parameters),
        }
    }
}

/// Resolves repository methods: a method with a named query invokes that
/// module, any other method is derived from its name.
#[derive(Clone)]
pub struct QueryLookupStrategy {
    context: MappingContext,
    named_queries: NamedQueries,
}

impl QueryLookupStrategy {
    pub fn new(context: MappingContext, named_queries: NamedQueries) -> Self {
        QueryLookupStrategy {
            context,
            named_queries,
        }
    }

    pub fn named_queries(&self) -> &NamedQueries {
        &self.named_queries
    }

    pub fn resolve(&self, method: QueryMethod) -> MarklogicResult<RepositoryQuery> {
        let query_name = method.named_query_name();
        if let Some(module_uri) = self.named_queries.get_query(&query_name) {
            log::debug!("Method {} bound to module {}", query_name, module_uri);
            return Ok(RepositoryQuery::ModuleInvoke(ModuleInvokeQuery::new(module_uri, method)));
        }

        let query = PartTreeQuery::new(method, self.context.clone())?;
        log::debug!("Method {} derived as {}", query_name, query.tree());
        Ok(RepositoryQuery::PartTree(query))
    }
}
