//! Standardized API response envelope.
//!
//! Every handler reply is one of: success-with-data, success-empty,
//! validation-error (with field-error list), not-found, unauthorized, or
//! server-error. Successes use [`ApiResponse`]; everything else uses
//! [`ErrorResponse`].

use serde::{Deserialize, Serialize};

/// Standard successful API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Success with a payload.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    /// Success with no payload.
    pub fn ok_empty(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

/// Error envelope carrying a status discriminator and, for validation
/// failures, the offending field errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,

    /// A short, human-readable summary of the problem.
    pub message: String,

    /// The HTTP status code.
    pub status: u16,

    /// Field-error list (or other diagnostic payload) for validation
    /// failures.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            status,
            errors: None,
        }
    }

    pub fn with_errors(mut self, errors: serde_json::Value) -> Self {
        self.errors = Some(errors);
        self
    }

    // Common error constructors

    pub fn validation(errors: serde_json::Value) -> Self {
        Self::new(400, "Validation Error.").with_errors(errors)
    }

    pub fn invalid_id() -> Self {
        Self::new(400, "Invalid Error.").with_errors(serde_json::Value::from("Invalid ID"))
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(401, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(404, message)
    }

    pub fn internal_error() -> Self {
        Self::new(500, "Internal Server Error")
    }
}
