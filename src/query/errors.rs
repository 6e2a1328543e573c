//! # Query Errors
//!
//! Syntax errors are reported to the caller as-is; store errors pass
//! through untranslated. No partial results accompany either.

use thiserror::Error;

use crate::store::StoreError;

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Malformed filter, sort or order input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    /// A filter clause without a `:` separator
    #[error("invalid query key/value pair: '{0}'")]
    InvalidPair(String),

    /// Direction token other than `asc` / `desc`
    #[error("invalid order '{0}'. Must be either [asc|desc]")]
    InvalidOrder(String),

    /// Order list neither matches the sort list nor has one entry
    #[error("'sortby', 'order' sizes mismatch or 'order' size is not 1 (sortby: {sortby}, order: {order})")]
    SizeMismatch { sortby: usize, order: usize },

    /// Order given with nothing to sort
    #[error("unused 'order' fields")]
    UnusedOrder,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QueryError {
    #[error("invalid query syntax: {0}")]
    InvalidQuerySyntax(#[from] SyntaxError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = QueryError::from(SyntaxError::UnusedOrder);
        assert_eq!(err.to_string(), "invalid query syntax: unused 'order' fields");

        let err = QueryError::from(StoreError::Unavailable("lock poisoned".to_string()));
        assert_eq!(err.to_string(), "store unavailable: lock poisoned");
    }
}
