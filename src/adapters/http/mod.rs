//! HTTP adapters - REST API implementations.
//!
//! Each feature module has its own routes, handlers, and DTOs. Errors
//! from the application layer are converted to HTTP responses by the
//! shared [`ApiError`] wrapper.

pub mod billing;
pub mod content;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

pub use billing::{billing_router, BillingAppState};
pub use content::{content_router, ContentAppState};

/// JSON error body returned for all failed requests.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
        }
    }
}

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct ApiError(DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.0.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::ContentBlocked => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorCode::PaymentGatewayError | ErrorCode::CompletionProviderError => {
                StatusCode::BAD_GATEWAY
            }
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = ErrorResponse::new(self.0.code.to_string(), self.0.message.clone());
        (status, Json(body)).into_response()
    }
}
