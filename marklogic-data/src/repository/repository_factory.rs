use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::common::{atomic, Atomic, ReadExecutor, WriteExecutor};
use crate::errors::MarklogicResult;
use crate::mapping::{MappingContext, MarklogicEntity};
use crate::repository::{MappingEntityInformation, NamedQueries, QueryLookupStrategy, QueryMethod, RepositoryQuery};

/// Entry point for a repository layer: hands out entity information and
/// resolves repository methods to queries.
///
/// Resolved methods are cached by their `"<Entity>.<method>"` name, so the
/// method name is parsed once however often it is called. Cloning is cheap
/// and clones share the cache.
#[derive(Clone)]
pub struct RepositoryFactory {
    inner: Arc<RepositoryFactoryInner>,
}

impl RepositoryFactory {
    pub fn new(context: MappingContext) -> Self {
        RepositoryFactory::with_named_queries(context, NamedQueries::new())
    }

    pub fn with_named_queries(context: MappingContext, named_queries: NamedQueries) -> Self {
        RepositoryFactory {
            inner: Arc::new(RepositoryFactoryInner::new(context, named_queries)),
        }
    }

    pub fn context(&self) -> &MappingContext {
        &self.inner.context
    }

    pub fn query_lookup_strategy(&self) -> &QueryLookupStrategy {
        &self.inner.lookup_strategy
    }

    pub fn entity_information<T: MarklogicEntity>(&self) -> MarklogicResult<MappingEntityInformation<T>> {
        let entity = self.inner.context.persistent_entity::<T>()?;
        MappingEntityInformation::new(entity)
    }

    /// Resolves `method`, reusing an earlier resolution of the same method.
    pub fn repository_query(&self, method: QueryMethod) -> MarklogicResult<RepositoryQuery> {
        self.inner.repository_query(method)
    }
}

struct RepositoryFactoryInner {
    context: MappingContext,
    lookup_strategy: QueryLookupStrategy,
    queries: Atomic<HashMap<String, RepositoryQuery>>,
    lock: Mutex<()>,
}

impl RepositoryFactoryInner {
    fn new(context: MappingContext, named_queries: NamedQueries) -> Self {
        RepositoryFactoryInner {
            lookup_strategy: QueryLookupStrategy::new(context.clone(), named_queries),
            context,
            queries: atomic(HashMap::new()),
            lock: Mutex::new(()),
        }
    }

    fn cached(&self, name: &str, method: &QueryMethod) -> Option<RepositoryQuery> {
        self.queries.read_with(|queries| {
            queries
                .get(name)
                .filter(|query| query.query_method() == method)
                .cloned()
        })
    }

    fn repository_query(&self, method: QueryMethod) -> MarklogicResult<RepositoryQuery> {
        let name = method.named_query_name();
        if let Some(query) = self.cached(&name, &method) {
            return Ok(query);
        }

        let _guard = self.lock.lock();
        if let Some(query) = self.cached(&name, &method) {
            return Ok(query);
        }

        let query = self.lookup_strategy.resolve(method)?;
        self.queries
            .write_with(|queries| queries.insert(name, query.clone()));
        Ok(query)
    }
}
