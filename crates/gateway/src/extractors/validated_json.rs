//! Validated JSON extractor.

use axum::{
    async_trait,
    extract::{rejection::JsonRejection, FromRef, FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;

use common::AppError;

use super::reject;
use crate::validation::{RequestValidator, Validatable};

/// JSON extractor that rejects malformed or rule-violating payloads
/// before the handler runs.
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validatable,
    RequestValidator: FromRef<S>,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let extensions = req.extensions().clone();

        // Extract JSON
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|e| reject(&extensions, AppError::invalid_body(e.body_text())))?;

        // Validate
        RequestValidator::from_ref(state)
            .validate(&value)
            .map_err(|e| reject(&extensions, e))?;

        Ok(ValidatedJson(value))
    }
}
