//! Error types for the storage layer.

use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur during storage operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No record is stored under the identifier.
    #[error("fish not found: {0}")]
    NotFound(String),

    /// A random pick was requested from an empty store.
    #[error("store is empty")]
    Empty,
}
