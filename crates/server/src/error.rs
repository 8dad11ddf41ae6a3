//! Unified error handling for the waitlist service.
//!
//! Provides a unified `AppError` type that maps to the JSON error shape the
//! widget clients expect (`{"error": "..."}`). All route handlers should
//! return `Result<T, AppError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::VerifyError;
use crate::store::StoreError;

/// Application-level error type for the waitlist service.
#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or missing client input.
    #[error("{0}")]
    Validation(String),

    /// Duplicate email registration.
    #[error("{0}")]
    Conflict(String),

    /// Identity assertion could not be verified.
    #[error("{0}")]
    Authentication(String),

    /// Requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Storage operation failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// JSON error body, the shape existing clients parse.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // A duplicate email surfaced by the storage constraint is a client
        // error, not a server fault.
        let this = match self {
            Self::Store(StoreError::Conflict(msg)) => Self::Conflict(msg),
            other => other,
        };

        if matches!(this, Self::Store(_) | Self::Internal(_)) {
            tracing::error!(error = %this, "Request error");
        }

        let status = match &this {
            Self::Validation(_) | Self::Conflict(_) | Self::Authentication(_) => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Store(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &this {
            Self::Store(_) | Self::Internal(_) => "Server error".to_string(),
            _ => this.to_string(),
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<VerifyError> for AppError {
    fn from(_: VerifyError) -> Self {
        // The client only ever sees a generic rejection; the specific
        // verification failure is logged at the verifier.
        Self::Authentication("Invalid Google token".to_string())
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn get_status(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Validation("Valid email required".to_string());
        assert_eq!(err.to_string(), "Valid email required");

        let err = AppError::NotFound("export kind".to_string());
        assert_eq!(err.to_string(), "Not found: export kind");
    }

    #[test]
    fn test_client_errors_are_400() {
        assert_eq!(
            get_status(AppError::Validation("bad".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Conflict("dup".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(AppError::Authentication("bad token".to_string())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_store_conflict_is_400() {
        let err = AppError::Store(StoreError::Conflict("Email already subscribed".to_string()));
        assert_eq!(get_status(err), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_store_failure_is_500() {
        let err = AppError::Store(StoreError::DataCorruption("bad row".to_string()));
        assert_eq!(get_status(err), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            get_status(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_not_found_is_404() {
        assert_eq!(
            get_status(AppError::NotFound("x".to_string())),
            StatusCode::NOT_FOUND
        );
    }
}
