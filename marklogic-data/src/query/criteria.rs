use std::fmt::{Display, Formatter};

use itertools::Itertools;

use crate::common::{QName, Value};

/// Operator of a criteria node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum Operator {
    And,
    Or,
    /// Document belongs to the named collection.
    Collection,
}

/// Operator of a group node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(rename_all = "lowercase"))]
pub enum LogicalOperator {
    And,
    Or,
}

impl From<LogicalOperator> for Operator {
    fn from(operator: LogicalOperator) -> Self {
        match operator {
            LogicalOperator::And => Operator::And,
            LogicalOperator::Or => Operator::Or,
        }
    }
}

/// A node of a criteria tree.
///
/// Leaves constrain either an element value (`Field`) or the document
/// collection (`Collection`); groups combine one or more children with AND or
/// OR. Trees are built bottom-up and never contain cycles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize),
    serde(tag = "type", rename_all = "lowercase")
)]
pub enum Criteria {
    /// Element `qname` equals `value`.
    Field { qname: QName, value: Value },
    /// Document is in collection `value`.
    Collection { value: Value },
    Group {
        operator: LogicalOperator,
        children: Vec<Criteria>,
    },
}

impl Criteria {
    pub fn field<V: Into<Value>>(qname: QName, value: V) -> Self {
        Criteria::Field {
            qname,
            value: value.into(),
        }
    }

    pub fn collection<V: Into<Value>>(value: V) -> Self {
        Criteria::Collection { value: value.into() }
    }

    /// AND group of `children`; `None` if there are none. A single child is
    /// still wrapped.
    pub fn and(children: Vec<Criteria>) -> Option<Self> {
        Criteria::group(LogicalOperator::And, children)
    }

    /// OR group of `children`; `None` if there are none. A single child is
    /// still wrapped.
    pub fn or(children: Vec<Criteria>) -> Option<Self> {
        Criteria::group(LogicalOperator::Or, children)
    }

    fn group(operator: LogicalOperator, children: Vec<Criteria>) -> Option<Self> {
        if children.is_empty() {
            None
        } else {
            Some(Criteria::Group { operator, children })
        }
    }

    /// Adds `other` to this node's conjunction.
    ///
    /// An AND node grows in place, anything else is wrapped with `other` into
    /// a new AND node. When `other` is itself an AND node its children are
    /// spliced in, so repeated calls build one flat conjunction.
    pub fn conjoin(self, other: Criteria) -> Criteria {
        let mut children = match self {
            Criteria::Group {
                operator: LogicalOperator::And,
                children,
            } => children,
            running => vec![running],
        };

        match other {
            Criteria::Group {
                operator: LogicalOperator::And,
                children: nested,
            } => children.extend(nested),
            other => children.push(other),
        }

        Criteria::Group {
            operator: LogicalOperator::And,
            children,
        }
    }

    /// Operator of the node; `None` for field leaves.
    pub fn operator(&self) -> Option<Operator> {
        match self {
            Criteria::Field { .. } => None,
            Criteria::Collection { .. } => Some(Operator::Collection),
            Criteria::Group { operator, .. } => Some((*operator).into()),
        }
    }

    /// Children of a group node; empty for leaves.
    pub fn children(&self) -> &[Criteria] {
        match self {
            Criteria::Group { children, .. } => children,
            _ => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        !matches!(self, Criteria::Group { .. })
    }

    pub fn qname(&self) -> Option<&QName> {
        match self {
            Criteria::Field { qname, .. } => Some(qname),
            _ => None,
        }
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Criteria::Field { value, .. } | Criteria::Collection { value } => Some(value),
            Criteria::Group { .. } => None,
        }
    }
}

impl Display for Criteria {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Criteria::Field { qname, value } => write!(f, "{} = {}", qname, value),
            Criteria::Collection { value } => write!(f, "collection({})", value),
            Criteria::Group { operator, children } => {
                let separator = match operator {
                    LogicalOperator::And => " && ",
                    LogicalOperator::Or => " || ",
                };
                write!(f, "({})", children.iter().join(separator))
            }
        }
    }
}
