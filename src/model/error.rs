//! Construction-time validation errors.
//!
//! These are fatal: callers are expected to have validated user input
//! before building model objects, so an error here means the caller
//! handed us something malformed.

/// Validation errors raised when constructing model objects.
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    #[error("filter column has an empty expression code")]
    EmptyColumnCode,

    #[error("unknown filter operator: {0}")]
    UnknownOperator(String),

    #[error("unknown group operator: {0} (expected \"and\" or \"or\")")]
    UnknownGroupOperator(String),

    #[error("unknown sort direction: {0} (expected \"asc\" or \"desc\")")]
    UnknownSortDirection(String),

    #[error("unknown value kind: {0}")]
    UnknownValueKind(String),

    #[error("unknown column data type: {0}")]
    UnknownDataType(String),
}
