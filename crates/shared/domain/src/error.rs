//! Domain-level errors.
//!
//! These errors represent business rule violations and persistence failures.
//! They are independent of infrastructure concerns (HTTP, database driver):
//! callers branch on the variant, never on message text.

use std::time::Duration;

use thiserror::Error;

/// Failures reported by a storage backend.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// The backend rejected or failed the operation
    #[error("{0}")]
    Backend(String),

    /// The request deadline passed before the backend answered
    #[error("storage call abandoned after {0:?}: request deadline exceeded")]
    Timeout(Duration),
}

impl StorageError {
    /// Create a backend error from any displayable driver error
    pub fn backend(err: impl std::fmt::Display) -> Self {
        StorageError::Backend(err.to_string())
    }

    /// Check if the failure was caused by the request deadline
    pub fn is_timeout(&self) -> bool {
        matches!(self, StorageError::Timeout(_))
    }
}

/// Domain-specific errors for business rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Date text is not a valid `YYYY-MM-DD` calendar date
    #[error("Invalid date format: {0}")]
    DateFormat(String),

    /// Entity not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Persistence failure, passed through unchanged
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl DomainError {
    /// Create a date format error
    pub fn date_format(msg: impl Into<String>) -> Self {
        DomainError::DateFormat(msg.into())
    }

    /// Create a not found error
    pub fn not_found(entity: impl Into<String>) -> Self {
        DomainError::NotFound(entity.into())
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, DomainError::NotFound(_))
    }
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
