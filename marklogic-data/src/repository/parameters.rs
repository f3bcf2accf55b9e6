use crate::common::{Pageable, Sort, Value};

/// One argument of a repository method call.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum Parameter {
    Value(Value),
    Values(Vec<Value>),
    /// A `None` argument.
    Absent,
}

impl Parameter {
    pub fn value<V: Into<Value>>(value: V) -> Self {
        Parameter::Value(value.into())
    }

    pub fn values<V: Into<Value>, I: IntoIterator<Item = V>>(values: I) -> Self {
        Parameter::Values(values.into_iter().map(Into::into).collect())
    }

    pub fn optional<V: Into<Value>>(value: Option<V>) -> Self {
        match value {
            Some(value) => Parameter::value(value),
            None => Parameter::Absent,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Parameter::Absent)
    }
}

/// Arguments of a repository method call, in declaration order.
///
/// `Sort` and `Pageable` arguments are carried apart from the values bound
/// to the method name's predicate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    values: Vec<Parameter>,
    sort: Option<Sort>,
    pageable: Option<Pageable>,
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn of(values: Vec<Parameter>) -> Self {
        Parameters {
            values,
            sort: None,
            pageable: None,
        }
    }

    pub fn add(mut self, parameter: Parameter) -> Self {
        self.values.push(parameter);
        self
    }

    pub fn with_sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_pageable(mut self, pageable: Pageable) -> Self {
        self.pageable = Some(pageable);
        self
    }

    pub fn values(&self) -> &[Parameter] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }

    pub fn pageable(&self) -> Option<&Pageable> {
        self.pageable.as_ref()
    }
}
