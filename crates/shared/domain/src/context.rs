//! Per-request context passed explicitly through every layer.

use std::fmt;
use std::time::{Duration, Instant};

use uuid::Uuid;

use crate::constants::{DEFAULT_REQUEST_TIMEOUT, MAX_REQUEST_TIMEOUT};

/// Correlation identifier grouping all log lines of one request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new globally unique identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Use a caller-supplied identifier, or generate one if it is blank
    pub fn from_header(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(id) if !id.is_empty() => Self(id.to_string()),
            _ => Self::generate(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Request-scoped values: the correlation id and the deadline that bounds
/// every storage call made on behalf of the request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: RequestId,
    started_at: Instant,
    timeout: Duration,
}

impl RequestContext {
    /// Create a context whose deadline is `timeout` from now.
    ///
    /// Timeouts above [`MAX_REQUEST_TIMEOUT`] are clamped to it.
    pub fn new(request_id: RequestId, timeout: Duration) -> Self {
        Self {
            request_id,
            started_at: Instant::now(),
            timeout: timeout.min(MAX_REQUEST_TIMEOUT),
        }
    }

    /// Context with a generated id and the default timeout (tests, CLI tools)
    pub fn background() -> Self {
        Self::new(RequestId::generate(), DEFAULT_REQUEST_TIMEOUT)
    }

    pub fn request_id(&self) -> &RequestId {
        &self.request_id
    }

    /// Instant after which storage work must be abandoned
    pub fn deadline(&self) -> Instant {
        // timeout is bounded by MAX_REQUEST_TIMEOUT, so this cannot overflow
        self.started_at + self.timeout
    }

    /// Total time budget of the request
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Time elapsed since the context was created
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}
