//! User handlers.
//!
//! Each handler receives an already parsed and validated request, calls the
//! user service once with the request's context and maps the outcome onto a
//! status code. Failures are logged with the request's correlation id.

use axum::{
    extract::{Extension, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};

use common::{AppError, AppResult, ErrorResponse};
use domain::{CreateUserRequest, DomainError, RequestContext, UpdateUserRequest, UserResponse};
use tracing::info;

use crate::extractors::{UserId, ValidatedJson};
use crate::state::AppState;

/// Create user routes
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/:id", get(get_user).put(update_user).delete(delete_user))
}

/// Convert a service error, naming the failed action, and log it.
fn failure<'a>(
    ctx: &'a RequestContext,
    action: &'static str,
) -> impl FnOnce(DomainError) -> AppError + 'a {
    move |err| {
        let err = AppError::from_domain(err, action);
        err.log(ctx.request_id().as_str());
        err
    }
}

/// Create a user
#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserResponse),
        (status = 400, description = "Malformed body, validation error or bad date", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn create_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    ValidatedJson(payload): ValidatedJson<CreateUserRequest>,
) -> AppResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(&ctx, payload)
        .await
        .map_err(failure(&ctx, "create user"))?;

    info!(request_id = %ctx.request_id(), user_id = user.id, "User created");
    Ok((StatusCode::CREATED, Json(user)))
}

/// List all users
#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    responses(
        (status = 200, description = "All users", body = Vec<UserResponse>),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
) -> AppResult<Json<Vec<UserResponse>>> {
    let users = state
        .user_service
        .list_users(&ctx)
        .await
        .map_err(failure(&ctx, "list users"))?;

    Ok(Json(users))
}

/// Get user by ID
#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "User with derived age", body = UserResponse),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn get_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    UserId(id): UserId,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .get_user(&ctx, id)
        .await
        .map_err(failure(&ctx, "get user"))?;

    Ok(Json(user))
}

/// Replace a user's name and date of birth
#[utoipa::path(
    put,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserResponse),
        (status = 400, description = "Invalid ID, body, validation error or bad date", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn update_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    UserId(id): UserId,
    ValidatedJson(payload): ValidatedJson<UpdateUserRequest>,
) -> AppResult<Json<UserResponse>> {
    let user = state
        .user_service
        .update_user(&ctx, id, payload)
        .await
        .map_err(failure(&ctx, "update user"))?;

    info!(request_id = %ctx.request_id(), user_id = id, "User updated");
    Ok(Json(user))
}

/// Delete user
#[utoipa::path(
    delete,
    path = "/users/{id}",
    tag = "Users",
    params(
        ("id" = i32, Path, description = "User ID")
    ),
    responses(
        (status = 204, description = "User deleted, or there was nothing to delete"),
        (status = 400, description = "Invalid user ID", body = ErrorResponse),
        (status = 500, description = "Storage failure", body = ErrorResponse)
    )
)]
pub async fn delete_user(
    State(state): State<AppState>,
    Extension(ctx): Extension<RequestContext>,
    UserId(id): UserId,
) -> AppResult<StatusCode> {
    state
        .user_service
        .delete_user(&ctx, id)
        .await
        .map_err(failure(&ctx, "delete user"))?;

    info!(request_id = %ctx.request_id(), user_id = id, "User deleted");
    Ok(StatusCode::NO_CONTENT)
}
