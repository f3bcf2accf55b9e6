use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for mapping and query building.
///
/// Every failure of this layer happens while building a value (entity metadata,
/// criteria, a query), never while executing it. The kind tells the caller
/// which part of its own setup is wrong.
///
/// # Examples
///
/// ```rust,ignore
/// use marklogic_data::errors::{MarklogicError, ErrorKind, MarklogicResult};
///
/// fn example() -> MarklogicResult<()> {
///     Err(MarklogicError::new("No property 'nickname' on Person", ErrorKind::LookupError))
/// }
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    /// The query or mapping setup is contradictory or incomplete
    /// (query by type and by example together, sort without a target type,
    /// invalid entity metadata, unbindable method parameters).
    ConfigurationError,
    /// A named entity or property could not be resolved.
    LookupError,
    /// Reading a property from an instance failed.
    AccessorError,
    /// A collection or URI template is malformed or cannot be expanded.
    ExpressionError,
    /// A repository method name cannot be turned into a query.
    QueryDerivationError,
    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::ConfigurationError => write!(f, "Configuration error"),
            ErrorKind::LookupError => write!(f, "Lookup error"),
            ErrorKind::AccessorError => write!(f, "Accessor error"),
            ErrorKind::ExpressionError => write!(f, "Expression error"),
            ErrorKind::QueryDerivationError => write!(f, "Query derivation error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Error type of the crate.
///
/// `MarklogicError` carries a message, an [ErrorKind], an optional cause and the
/// backtrace captured at creation time.
///
/// # Examples
///
/// ```rust,ignore
/// use marklogic_data::errors::{MarklogicError, ErrorKind};
///
/// let cause = MarklogicError::new("No property 'country' on Address", ErrorKind::LookupError);
/// let err = MarklogicError::new_with_cause("Cannot resolve sort order", ErrorKind::LookupError, cause);
/// ```
#[derive(Clone)]
pub struct MarklogicError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<MarklogicError>>,
    backtrace: Atomic<Backtrace>,
}

impl MarklogicError {
    /// Creates a new `MarklogicError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        MarklogicError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `MarklogicError` wrapping the error that caused it.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: MarklogicError) -> Self {
        MarklogicError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&MarklogicError> {
        self.cause.as_deref()
    }
}

impl Display for MarklogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for MarklogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}: {}\nCaused by: {:?}", self.error_kind, self.message, cause),
            None => write!(f, "{}: {}\n{:?}", self.error_kind, self.message, self.backtrace.read()),
        }
    }
}

impl Error for MarklogicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// Shorthand for `Result<T, MarklogicError>`.
pub type MarklogicResult<T> = Result<T, MarklogicError>;

impl From<std::fmt::Error> for MarklogicError {
    fn from(err: std::fmt::Error) -> Self {
        MarklogicError::new(
            &format!("Formatting error: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<regex::Error> for MarklogicError {
    fn from(err: regex::Error) -> Self {
        MarklogicError::new(
            &format!("Invalid pattern: {}", err),
            ErrorKind::InternalError,
        )
    }
}

impl From<String> for MarklogicError {
    fn from(msg: String) -> Self {
        MarklogicError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for MarklogicError {
    fn from(msg: &str) -> Self {
        MarklogicError::new(msg, ErrorKind::InternalError)
    }
}
