//! API Gateway Library
//!
//! This crate provides the HTTP REST API over the user service: routing,
//! request validation, error mapping, request correlation and panic recovery.

pub mod config;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::info;

use user_service_lib::service::UserService;

use crate::config::GatewayConfig;
use crate::routes::create_router;
use crate::state::AppState;

/// Run the HTTP server until ctrl-c.
pub async fn run_server(
    config: GatewayConfig,
    user_service: Arc<dyn UserService>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Build address
    let addr: SocketAddr = format!("{}:{}", config.host, config.port).parse()?;

    // Build router
    let state = AppState::new(user_service, config);
    let app = create_router(state);

    info!("Gateway listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
