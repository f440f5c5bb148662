//! Request correlation middleware.
//!
//! Every request gets an identifier, taken from the `X-Request-ID` header
//! when the client sent a non-blank one and generated otherwise. The
//! identifier and the request deadline travel to handlers as a
//! [`RequestContext`] extension, and the identifier is echoed back in the
//! response header.

use std::net::SocketAddr;

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderValue, Request},
    middleware::Next,
    response::Response,
};
use tracing::{info, info_span, Instrument};

use domain::{RequestContext, RequestId, REQUEST_ID_HEADER};

use crate::state::AppState;

/// Attach a [`RequestContext`] to the request and log its start and end.
pub async fn request_context_middleware(
    State(state): State<AppState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let request_id = RequestId::from_header(
        request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|h| h.to_str().ok()),
    );
    let ctx = RequestContext::new(request_id.clone(), state.config.request_timeout());

    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let ip = get_client_ip(&request, connect_info);

    request.extensions_mut().insert(ctx.clone());

    let span = info_span!("request", request_id = %request_id);
    info!(
        parent: &span,
        request_id = %request_id,
        method = %method,
        path = %path,
        ip = %ip,
        "Request started"
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    info!(
        parent: &span,
        request_id = %request_id,
        method = %method,
        path = %path,
        status = response.status().as_u16(),
        duration = ?ctx.elapsed(),
        "Request completed"
    );

    if let Ok(value) = HeaderValue::from_str(request_id.as_str()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }

    response
}

fn get_client_ip(request: &Request<Body>, connect_info: Option<ConnectInfo<SocketAddr>>) -> String {
    // Try X-Forwarded-For header first
    if let Some(ip) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|forwarded| forwarded.split(',').next())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return ip.to_string();
    }

    // Try X-Real-IP header
    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
        .map(str::trim)
        .filter(|ip| !ip.is_empty())
    {
        return real_ip.to_string();
    }

    // Fall back to the peer address
    connect_info
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}
