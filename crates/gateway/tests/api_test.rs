//! HTTP API tests against an in-memory user service.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use domain::{
    CreateUserRequest, DomainResult, RequestContext, StorageError, UpdateUserRequest, UserResponse,
};
use gateway_lib::config::GatewayConfig;
use gateway_lib::routes::create_router;
use gateway_lib::state::AppState;
use user_service_lib::service::UserService;

fn app() -> Router {
    app_with(user_service_lib::in_memory())
}

fn app_with(service: Arc<dyn UserService>) -> Router {
    create_router(AppState::new(service, GatewayConfig::default()))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: Method, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_alice(app: &Router) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "Alice", "dob": "1990-05-10"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await
}

#[tokio::test]
async fn create_user_returns_201_with_age() {
    let app = app();

    let body = create_alice(&app).await;

    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], "Alice");
    assert_eq!(body["dob"], "1990-05-10");
    assert!(body["age"].as_i64().unwrap() >= 34);
}

#[tokio::test]
async fn short_name_is_a_validation_error() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "A", "dob": "2000-01-01"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Validation failed", "message": "name must be at least 2 characters"})
    );
}

#[tokio::test]
async fn missing_fields_are_a_validation_error() {
    let response = app()
        .oneshot(json_request(Method::POST, "/users", json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Validation failed");
}

#[tokio::test]
async fn bad_date_is_rejected_with_400() {
    let response = app()
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "Bob", "dob": "10/05/1990"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid date format");
}

#[tokio::test]
async fn malformed_json_is_invalid_body() {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid request body");
}

#[tokio::test]
async fn non_integer_id_is_invalid_user_id() {
    let response = app()
        .oneshot(empty_request(Method::GET, "/users/abc"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "Invalid user ID");
}

#[tokio::test]
async fn unknown_user_is_404() {
    let response = app()
        .oneshot(empty_request(Method::GET, "/users/999999"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await, json!({"error": "User not found"}));
}

#[tokio::test]
async fn get_returns_created_user() {
    let app = app();
    let created = create_alice(&app).await;

    let response = app
        .oneshot(empty_request(
            Method::GET,
            &format!("/users/{}", created["id"]),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, created);
}

#[tokio::test]
async fn update_replaces_fields() {
    let app = app();
    let created = create_alice(&app).await;

    let response = app
        .oneshot(json_request(
            Method::PUT,
            &format!("/users/{}", created["id"]),
            json!({"name": "Alicia", "dob": "1991-06-11"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["name"], "Alicia");
    assert_eq!(body["dob"], "1991-06-11");
}

#[tokio::test]
async fn update_of_missing_user_is_404_and_creates_nothing() {
    let app = app();

    let response = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            "/users/42",
            json!({"name": "Nobody", "dob": "2000-01-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let list = app
        .oneshot(empty_request(Method::GET, "/users"))
        .await
        .unwrap();
    assert_eq!(body_json(list).await, json!([]));
}

#[tokio::test]
async fn delete_returns_204_then_user_is_gone() {
    let app = app();
    let created = create_alice(&app).await;
    let uri = format!("/users/{}", created["id"]);

    let response = app
        .clone()
        .oneshot(empty_request(Method::DELETE, &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert!(bytes.is_empty());

    let response = app
        .oneshot(empty_request(Method::GET, &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_of_missing_user_is_204() {
    let response = app()
        .oneshot(empty_request(Method::DELETE, "/users/777"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn list_returns_all_users() {
    let app = app();
    create_alice(&app).await;
    create_alice(&app).await;

    let response = app
        .oneshot(empty_request(Method::GET, "/users"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn request_id_header_is_echoed() {
    let request = Request::builder()
        .uri("/users")
        .header("X-Request-ID", "trace-abc-123")
        .body(Body::empty())
        .unwrap();

    let response = app().oneshot(request).await.unwrap();

    assert_eq!(
        response.headers().get("x-request-id").unwrap(),
        "trace-abc-123"
    );
}

#[tokio::test]
async fn concurrent_requests_get_distinct_generated_ids() {
    let app = app();

    let (first, second) = tokio::join!(
        app.clone().oneshot(empty_request(Method::GET, "/users")),
        app.oneshot(empty_request(Method::GET, "/users")),
    );
    let (first, second) = (first.unwrap(), second.unwrap());

    let first_id = first.headers().get("x-request-id").unwrap().to_str().unwrap();
    let second_id = second.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert!(uuid::Uuid::parse_str(first_id).is_ok());
    assert_ne!(first_id, second_id);
}

#[tokio::test]
async fn error_responses_carry_request_id() {
    let response = app()
        .oneshot(empty_request(Method::GET, "/users/999999"))
        .await
        .unwrap();

    assert!(response.headers().contains_key("x-request-id"));
}

/// Service whose every call panics.
struct PanickingService;

#[async_trait]
impl UserService for PanickingService {
    async fn create_user(&self, _: &RequestContext, _: CreateUserRequest) -> DomainResult<UserResponse> {
        panic!("create exploded")
    }

    async fn get_user(&self, _: &RequestContext, _: i32) -> DomainResult<UserResponse> {
        panic!("get exploded")
    }

    async fn update_user(
        &self,
        _: &RequestContext,
        _: i32,
        _: UpdateUserRequest,
    ) -> DomainResult<UserResponse> {
        panic!("update exploded")
    }

    async fn delete_user(&self, _: &RequestContext, _: i32) -> DomainResult<()> {
        panic!("delete exploded")
    }

    async fn list_users(&self, _: &RequestContext) -> DomainResult<Vec<UserResponse>> {
        panic!("list exploded")
    }
}

/// Service whose storage is unreachable.
struct BrokenStorageService;

fn unreachable_storage<T>() -> DomainResult<T> {
    Err(StorageError::backend("connection refused").into())
}

#[async_trait]
impl UserService for BrokenStorageService {
    async fn create_user(&self, _: &RequestContext, _: CreateUserRequest) -> DomainResult<UserResponse> {
        unreachable_storage()
    }

    async fn get_user(&self, _: &RequestContext, _: i32) -> DomainResult<UserResponse> {
        unreachable_storage()
    }

    async fn update_user(
        &self,
        _: &RequestContext,
        _: i32,
        _: UpdateUserRequest,
    ) -> DomainResult<UserResponse> {
        unreachable_storage()
    }

    async fn delete_user(&self, _: &RequestContext, _: i32) -> DomainResult<()> {
        unreachable_storage()
    }

    async fn list_users(&self, _: &RequestContext) -> DomainResult<Vec<UserResponse>> {
        unreachable_storage()
    }
}

#[tokio::test]
async fn panicking_handler_becomes_500_and_server_keeps_serving() {
    let app = app_with(Arc::new(PanickingService));

    let response = app
        .clone()
        .oneshot(empty_request(Method::GET, "/users/1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        body_json(response).await,
        json!({"error": "Internal Server Error"})
    );

    // Requests that never reach the service are unaffected
    let response = app
        .oneshot(empty_request(Method::GET, "/users/abc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn storage_failure_names_the_action() {
    let app = app_with(Arc::new(BrokenStorageService));

    let response = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "Alice", "dob": "1990-05-10"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({"error": "Failed to create user", "message": "connection refused"})
    );

    let response = app
        .oneshot(empty_request(Method::DELETE, "/users/1"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_json(response).await["error"], "Failed to delete user");
}

#[tokio::test]
async fn validation_failure_never_reaches_service() {
    // A panicking service proves the handler did not call it
    let response = app_with(Arc::new(PanickingService))
        .oneshot(json_request(
            Method::POST,
            "/users",
            json!({"name": "", "dob": "2000-01-01"}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn openapi_document_is_served() {
    let response = app()
        .oneshot(empty_request(Method::GET, "/api-docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let doc = body_json(response).await;
    assert!(doc["paths"]["/users/{id}"].is_object());
}
