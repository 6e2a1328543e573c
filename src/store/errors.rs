//! # Store Errors
//!
//! Error types raised by the record store. The query core propagates these
//! verbatim.

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Record store errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StoreError {
    /// Table was never registered with the store
    #[error("table not registered: {0}")]
    UnregisteredTable(String),

    /// Two models registered under the same table name
    #[error("table registered twice: {0}")]
    DuplicateTable(String),

    /// Field path does not resolve on the table
    #[error("unknown field '{field}' on table '{table}'")]
    UnknownField { table: String, field: String },

    /// Comparison value cannot be read as the field's type
    #[error("cannot compare field '{field}' with '{value}': expected {expected}")]
    TypeMismatch {
        field: String,
        value: String,
        expected: &'static str,
    },

    /// Record with the given id does not exist
    #[error("no row found in '{table}' with id {id}")]
    NotFound { table: String, id: i64 },

    /// Explicit id collides with an existing row
    #[error("duplicate id {id} in table '{table}'")]
    DuplicateKey { table: String, id: i64 },

    /// Fixture or record payload could not be decoded
    #[error("invalid record for '{table}': {message}")]
    InvalidRecord { table: String, message: String },

    /// The store itself is unusable (poisoned lock)
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    pub fn not_found(table: &str, id: i64) -> Self {
        Self::NotFound {
            table: table.to_string(),
            id,
        }
    }

    pub fn unknown_field(table: &str, field: impl Into<String>) -> Self {
        Self::UnknownField {
            table: table.to_string(),
            field: field.into(),
        }
    }

    /// Whether this error means "no such record"
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound { .. })
    }
}
