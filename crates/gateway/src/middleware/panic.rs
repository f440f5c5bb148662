//! Panic recovery: a panicking handler becomes a 500 response.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tracing::error;

use common::AppError;

/// Response for a handler that panicked, used with `CatchPanicLayer::custom`.
///
/// The panic detail is logged and never sent to the client.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let details = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    error!(panic = %details, "Handler panicked");
    AppError::internal(details).into_response()
}
