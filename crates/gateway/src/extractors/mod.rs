//! Custom extractors.

mod user_id;
mod validated_json;

pub use user_id::UserId;
pub use validated_json::ValidatedJson;

use axum::http::Extensions;

use common::AppError;
use domain::RequestContext;

/// Log a rejected request and hand the error back.
fn reject(extensions: &Extensions, err: AppError) -> AppError {
    let request_id = extensions
        .get::<RequestContext>()
        .map(|ctx| ctx.request_id().to_string())
        .unwrap_or_default();
    err.log(&request_id);
    err
}
