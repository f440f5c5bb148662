//! User ID path extractor.

use axum::{
    async_trait,
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

use common::AppError;

use super::reject;

/// The `:id` path segment parsed as a user identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for UserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let raw = match Path::<String>::from_request_parts(parts, state).await {
            Ok(Path(raw)) => raw,
            Err(e) => return Err(reject(&parts.extensions, AppError::invalid_id(e.body_text()))),
        };

        raw.parse::<i32>().map(UserId).map_err(|e| {
            reject(
                &parts.extensions,
                AppError::invalid_id(format!("'{}' is not an integer: {}", raw, e)),
            )
        })
    }
}
