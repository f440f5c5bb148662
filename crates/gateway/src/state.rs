//! Application state for dependency injection.

use std::sync::Arc;

use axum::extract::FromRef;

use user_service_lib::service::UserService;

use crate::config::GatewayConfig;
use crate::validation::RequestValidator;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<dyn UserService>,
    pub validator: RequestValidator,
    pub config: GatewayConfig,
}

impl AppState {
    /// Create new app state.
    pub fn new(user_service: Arc<dyn UserService>, config: GatewayConfig) -> Self {
        Self {
            user_service,
            validator: RequestValidator::new(),
            config,
        }
    }
}

impl FromRef<AppState> for RequestValidator {
    fn from_ref(state: &AppState) -> Self {
        state.validator.clone()
    }
}
