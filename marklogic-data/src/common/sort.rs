use std::fmt::{Display, Formatter};

/// Specifies the direction for sorting documents.
///
/// # Variants
/// - `Ascending`: Sort from smallest to largest value (A to Z, 0 to 9)
/// - `Descending`: Sort from largest to smallest value (Z to A, 9 to 0)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    /// Sort in ascending order
    #[default]
    Ascending,
    /// Sort in descending order
    Descending,
}

impl Direction {
    pub fn is_ascending(&self) -> bool {
        *self == Direction::Ascending
    }

    pub fn is_descending(&self) -> bool {
        *self == Direction::Descending
    }
}

/// One sort key: a property name of the domain type and a direction.
///
/// The property is the Rust-side field name (`lastname`), or a dotted path
/// through nested entities (`address.country`). It is resolved to a
/// qualified element name when the query is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Order {
    property: String,
    direction: Direction,
}

impl Order {
    pub fn new(property: &str, direction: Direction) -> Self {
        Order {
            property: property.to_string(),
            direction,
        }
    }

    pub fn asc(property: &str) -> Self {
        Order::new(property, Direction::Ascending)
    }

    pub fn desc(property: &str) -> Self {
        Order::new(property, Direction::Descending)
    }

    pub fn property(&self) -> &str {
        &self.property
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_ascending(&self) -> bool {
        self.direction.is_ascending()
    }
}

/// Ordered list of sort keys; the first one is the primary key.
///
/// # Examples
///
/// ```rust,ignore
/// // age descending, then lastname ascending
/// let sort = Sort::by(Direction::Descending, &["age"]).and(Sort::by_properties(&["lastname"]));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Sort {
    orders: Vec<Order>,
}

impl Sort {
    /// A sort with no keys.
    pub fn unsorted() -> Self {
        Sort { orders: Vec::new() }
    }

    /// Sorts by the given properties, all ascending.
    pub fn by_properties(properties: &[&str]) -> Self {
        Sort::by(Direction::Ascending, properties)
    }

    /// Sorts by the given properties, all in `direction`.
    pub fn by(direction: Direction, properties: &[&str]) -> Self {
        Sort {
            orders: properties
                .iter()
                .map(|property| Order::new(property, direction))
                .collect(),
        }
    }

    pub fn by_orders(orders: Vec<Order>) -> Self {
        Sort { orders }
    }

    /// Appends the keys of `other` after the keys of this sort.
    pub fn and(mut self, other: Sort) -> Self {
        self.orders.extend(other.orders);
        self
    }

    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    pub fn is_sorted(&self) -> bool {
        !self.orders.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Order> {
        self.orders.iter()
    }
}

impl<'a> IntoIterator for &'a Sort {
    type Item = &'a Order;
    type IntoIter = std::slice::Iter<'a, Order>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

/// A page request: zero-based page number, page size and an optional sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pageable {
    page_number: u64,
    page_size: u64,
    sort: Option<Sort>,
}

impl Pageable {
    pub fn of(page_number: u64, page_size: u64) -> Self {
        Pageable {
            page_number,
            page_size,
            sort: None,
        }
    }

    pub fn of_sorted(page_number: u64, page_size: u64, sort: Sort) -> Self {
        Pageable {
            page_number,
            page_size,
            sort: Some(sort),
        }
    }

    pub fn page_number(&self) -> u64 {
        self.page_number
    }

    pub fn page_size(&self) -> u64 {
        self.page_size
    }

    /// Number of documents to skip before this page.
    pub fn offset(&self) -> u64 {
        self.page_number.saturating_mul(self.page_size)
    }

    pub fn sort(&self) -> Option<&Sort> {
        self.sort.as_ref()
    }
}

impl Display for Pageable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "page {} of size {}", self.page_number, self.page_size)
    }
}
