//! Unified error handling for HTTP.
//!
//! Provides a single error type that the gateway converts into an axum
//! response with a flat `{ "error": ..., "message": ... }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::{DomainError, StorageError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application error types surfaced at the transport boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // Request shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid user ID: {0}")]
    InvalidId(String),

    // Validation
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Invalid date format: {0}")]
    DateFormat(String),

    // Resource errors
    #[error("User not found")]
    NotFound,

    // Persistence
    #[error("Failed to {action}: {source}")]
    Storage {
        /// Operation that failed, e.g. "create user"
        action: &'static str,
        source: StorageError,
    },

    // Internal
    #[error("Internal server error")]
    Internal(String),
}

/// Error response body for HTTP
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Short summary of what went wrong
    pub error: String,
    /// Optional detail
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: Option<String>) -> Self {
        Self {
            error: error.into(),
            message,
        }
    }
}

impl AppError {
    /// Get HTTP status code
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::InvalidBody(_)
            | AppError::InvalidId(_)
            | AppError::Validation(_)
            | AppError::DateFormat(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Storage { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the summary placed in the `error` field
    pub fn summary(&self) -> String {
        match self {
            AppError::InvalidBody(_) => "Invalid request body".to_string(),
            AppError::InvalidId(_) => "Invalid user ID".to_string(),
            AppError::Validation(_) => "Validation failed".to_string(),
            AppError::DateFormat(_) => "Invalid date format".to_string(),
            AppError::NotFound => "User not found".to_string(),
            AppError::Storage { action, .. } => format!("Failed to {}", action),
            AppError::Internal(_) => "Internal Server Error".to_string(),
        }
    }

    /// Get user-facing detail (hides internal details)
    pub fn user_message(&self) -> Option<String> {
        match self {
            // Show full message for client errors
            AppError::InvalidBody(msg)
            | AppError::InvalidId(msg)
            | AppError::Validation(msg)
            | AppError::DateFormat(msg) => Some(msg.clone()),

            // Storage failures pass the raw backend message through
            AppError::Storage { source, .. } => Some(source.to_string()),

            // Internal detail is logged where it happens, never sent
            AppError::NotFound | AppError::Internal(_) => None,
        }
    }

    /// Build the response body for this error
    pub fn body(&self) -> ErrorResponse {
        ErrorResponse::new(self.summary(), self.user_message())
    }

    /// Log the error against the request it failed.
    ///
    /// Server-side failures are logged at error level, rejected input at warn.
    pub fn log(&self, request_id: &str) {
        let summary = self.summary();
        if self.status().is_server_error() {
            tracing::error!(request_id, error = %self, "{}", summary);
        } else {
            tracing::warn!(request_id, error = %self, "{}", summary);
        }
    }
}

// =============================================================================
// HTTP Response (Axum)
// =============================================================================

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.body())).into_response()
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl AppError {
    /// Convert a service error raised while performing `action`,
    /// e.g. "create user".
    pub fn from_domain(err: DomainError, action: &'static str) -> Self {
        match err {
            DomainError::DateFormat(msg) => AppError::DateFormat(msg),
            DomainError::NotFound(_) => AppError::NotFound,
            DomainError::Storage(source) => AppError::Storage { action, source },
        }
    }
}

/// Result type alias
pub type AppResult<T> = Result<T, AppError>;

/// Convenience constructors
impl AppError {
    pub fn invalid_body(msg: impl Into<String>) -> Self {
        AppError::InvalidBody(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        AppError::InvalidId(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::Internal(msg.into())
    }
}
