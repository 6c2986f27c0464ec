//! Response envelope for REST handlers
//!
//! Every endpoint answers with the same wrapper: a status message, an
//! optional payload, pagination metadata on list responses, and per-field
//! messages on validation failures. Absent optionals are skipped during
//! serialization.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Pagination metadata attached to list responses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PaginationMeta {
    /// Current page number (1-indexed)
    pub page: i64,
    /// Requested page size
    pub count: i64,
    /// Total rows matching the filter
    pub total: i64,
}

/// Uniform response wrapper
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    /// Status message ("success", "created", or the error description)
    pub message: String,

    /// The response payload: a single entity or a page of entities
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,

    /// Present only on list responses
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PaginationMeta>,

    /// Present only on validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub validation_errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    /// Create a response carrying a payload
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            message: message.into(),
            data: Some(data),
            meta: None,
            validation_errors: None,
        }
    }

    /// Attach pagination metadata
    #[must_use]
    pub fn with_meta(mut self, page: i64, count: i64, total: i64) -> Self {
        self.meta = Some(PaginationMeta { page, count, total });
        self
    }

    /// Attach per-field validation messages
    #[must_use]
    pub fn with_validation_errors(mut self, errors: Vec<String>) -> Self {
        self.validation_errors = Some(errors);
        self
    }
}

impl ApiResponse<()> {
    /// Create a response with a message and no payload
    pub fn empty(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
            meta: None,
            validation_errors: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
