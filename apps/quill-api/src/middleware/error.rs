//! Error handling - maps every handler failure to a response envelope.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::validate::FieldError;
use quill_shared::ErrorResponse;
use std::fmt;

/// Application-level error type that converts to envelope responses.
#[derive(Debug)]
pub enum AppError {
    /// Field validation failed; carries the full field-error list.
    Validation(Vec<FieldError>),
    /// The path id is not a well-formed identifier (mutating routes only;
    /// Detail deliberately treats this as success-with-empty-object).
    InvalidId,
    NotFound(String),
    Unauthorized(String),
    BadRequest(String),
    Conflict(String),
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => write!(f, "Validation errors: {:?}", errors),
            AppError::InvalidId => write!(f, "Invalid ID"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::InvalidId | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            AppError::Validation(errors) => {
                ErrorResponse::validation(serde_json::json!(errors))
            }
            AppError::InvalidId => ErrorResponse::invalid_id(),
            AppError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            AppError::Unauthorized(msg) => ErrorResponse::unauthorized(msg.clone()),
            AppError::BadRequest(msg) => ErrorResponse::new(400, msg.clone()),
            AppError::Conflict(msg) => ErrorResponse::new(409, msg.clone()),
            AppError::Internal(detail) => {
                // Log internal errors; the detail is not echoed to clients
                tracing::error!("Internal error: {}", detail);
                ErrorResponse::internal_error()
            }
        };

        HttpResponse::build(self.status_code()).json(error)
    }
}

// Conversion from repository errors
impl From<quill_core::error::RepoError> for AppError {
    fn from(err: quill_core::error::RepoError) -> Self {
        match err {
            quill_core::error::RepoError::NotFound => {
                AppError::NotFound("Resource not found".to_string())
            }
            quill_core::error::RepoError::Constraint(msg) => AppError::Conflict(msg),
            quill_core::error::RepoError::Connection(msg) => {
                tracing::error!("Database connection error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
            quill_core::error::RepoError::Query(msg) => {
                tracing::error!("Database query error: {}", msg);
                AppError::Internal("Database error".to_string())
            }
        }
    }
}

/// Result type alias for handlers.
pub type AppResult<T> = Result<T, AppError>;
