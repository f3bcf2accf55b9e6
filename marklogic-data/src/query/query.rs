use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::query::{Criteria, SortCriteria};

/// A fully resolved search request, ready for an execution layer.
///
/// Immutable once built. A query without criteria matches every document of
/// its collection (or of the database when no collection is set).
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Query {
    collection: Option<String>,
    criteria: Option<Criteria>,
    sort_criteria: Vec<SortCriteria>,
    skip: Option<u64>,
    limit: Option<u64>,
}

impl Query {
    pub(crate) fn new(
        collection: Option<String>,
        criteria: Option<Criteria>,
        sort_criteria: Vec<SortCriteria>,
        skip: Option<u64>,
        limit: Option<u64>,
    ) -> Self {
        Query {
            collection,
            criteria,
            sort_criteria,
            skip,
            limit,
        }
    }

    pub fn collection(&self) -> Option<&str> {
        self.collection.as_deref()
    }

    pub fn criteria(&self) -> Option<&Criteria> {
        self.criteria.as_ref()
    }

    pub fn sort_criteria(&self) -> &[SortCriteria] {
        &self.sort_criteria
    }

    pub fn skip(&self) -> Option<u64> {
        self.skip
    }

    pub fn limit(&self) -> Option<u64> {
        self.limit
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Query {{ collection: ")?;
        match &self.collection {
            Some(collection) => write!(f, "{}", collection)?,
            None => write!(f, "*")?,
        }
        write!(f, ", criteria: ")?;
        match &self.criteria {
            Some(criteria) => write!(f, "{}", criteria)?,
            None => write!(f, "*")?,
        }
        if !self.sort_criteria.is_empty() {
            write!(f, ", sort: [{}]", self.sort_criteria.iter().join(", "))?;
        }
        if let Some(skip) = self.skip {
            write!(f, ", skip: {}", skip)?;
        }
        if let Some(limit) = self.limit {
            write!(f, ", limit: {}", limit)?;
        }
        write!(f, " }}")
    }
}
