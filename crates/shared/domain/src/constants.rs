//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

use std::time::Duration;

// =============================================================================
// Validation
// =============================================================================

/// Minimum name length in characters
pub const MIN_NAME_LENGTH: usize = 2;

/// Maximum name length in characters
pub const MAX_NAME_LENGTH: usize = 100;

// =============================================================================
// Dates
// =============================================================================

/// Wire format for dates of birth (`YYYY-MM-DD`)
pub const DOB_FORMAT: &str = "%Y-%m-%d";

/// Exact length of a formatted date of birth
pub const DOB_TEXT_LENGTH: usize = 10;

// =============================================================================
// Requests
// =============================================================================

/// Header carrying the correlation identifier
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Default upper bound for a single request's storage work
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Largest accepted request timeout
pub const MAX_REQUEST_TIMEOUT: Duration = Duration::from_secs(60 * 60);
