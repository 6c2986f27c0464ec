//! Error types and HTTP response conversion
//!
//! Three kinds cover the whole service surface: a missing entity, a request
//! that failed field validation, and a storage failure. Raw driver errors are
//! logged at the repository call site and never reach the client; only the
//! stable operation message crosses the boundary inside [`Error::Internal`].

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::handlers::response::ApiResponse;

/// Result type alias using the service error
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the service
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Entity absent for a given ID
    #[error("{0}")]
    NotFound(String),

    /// Malformed body or failed field validation, with per-field messages
    #[error("invalid data")]
    InvalidInput(Vec<String>),

    /// Storage failure or unexpected internal error
    #[error("{0}")]
    Internal(String),
}

impl Error {
    /// Create a "not found" error with a caller-facing message
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a validation error carrying per-field messages
    pub fn invalid_input(errors: Vec<String>) -> Self {
        Self::InvalidInput(errors)
    }

    /// Create an internal error with a caller-safe message
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status class for this error kind
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let body = match self {
            Self::InvalidInput(errors) => {
                ApiResponse::<()>::empty("invalid data").with_validation_errors(errors)
            }
            Self::NotFound(message) | Self::Internal(message) => ApiResponse::<()>::empty(message),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::not_found("device not found").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            Error::invalid_input(vec!["name failed on required".into()]).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::internal("failed to get device").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            Error::not_found("sensor not found").to_string(),
            "sensor not found"
        );
        assert_eq!(
            Error::invalid_input(vec!["status failed on deviceStatus".into()]).to_string(),
            "invalid data"
        );
        assert_eq!(
            Error::internal("failed to get sensor list").to_string(),
            "failed to get sensor list"
        );
    }

    #[test]
    fn test_into_response_status() {
        let response = Error::not_found("device not found").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response =
            Error::invalid_input(vec!["device_id failed on uuid".into()]).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = Error::internal("failed to create device").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
