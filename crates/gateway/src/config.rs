//! Gateway configuration.

use std::env;
use std::time::Duration;

use domain::{DEFAULT_REQUEST_TIMEOUT, MAX_REQUEST_TIMEOUT};

/// Gateway configuration.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server host
    pub host: String,
    /// Server port
    pub port: u16,
    /// Deadline applied to every request, in seconds
    pub request_timeout_secs: u64,
}

impl GatewayConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            host: env::var("SERVER_HOST").unwrap_or(defaults.host),
            port: env::var("SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(defaults.port),
            request_timeout_secs: request_timeout_secs_from(env::var("REQUEST_TIMEOUT_SECS").ok())
                .unwrap_or(defaults.request_timeout_secs),
        }
    }

    /// Per-request deadline.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Parse a timeout in seconds; zero and values above the maximum are rejected.
fn request_timeout_secs_from(raw: Option<String>) -> Option<u64> {
    raw.and_then(|t| t.trim().parse().ok())
        .filter(|t| *t > 0 && *t <= MAX_REQUEST_TIMEOUT.as_secs())
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT.as_secs(),
        }
    }
}
