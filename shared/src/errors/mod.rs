//! Shared error response envelope and error codes

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Standard error response structure used across all API endpoints.
///
/// `error` is the only message a client ever sees; it never carries store or
/// codec details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Human-readable, deliberately generic message
    pub error: String,

    /// Machine-readable error code
    pub code: String,

    /// Timestamp when the error occurred
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// Create a new error response
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn unauthorized() -> Self {
        Self::new(error_codes::UNAUTHORIZED, "unauthorized")
    }

    pub fn forbidden() -> Self {
        Self::new(error_codes::FORBIDDEN, "forbidden")
    }

    pub fn bad_request() -> Self {
        Self::new(error_codes::BAD_REQUEST, "invalid request")
    }

    pub fn internal() -> Self {
        Self::new(error_codes::INTERNAL_ERROR, "internal server error")
    }
}

/// Common error codes used across the application
pub mod error_codes {
    pub const UNAUTHORIZED: &str = "UNAUTHORIZED";
    pub const FORBIDDEN: &str = "FORBIDDEN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const BAD_REQUEST: &str = "BAD_REQUEST";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const INVALID_CREDENTIALS: &str = "INVALID_CREDENTIALS";
    pub const INVALID_TOKEN: &str = "INVALID_TOKEN";
    pub const CONFLICT: &str = "CONFLICT";
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}
