//! Webhook error types for Razorpay webhook handling.
//!
//! Defines all error conditions that can occur during webhook processing,
//! with HTTP status code mapping and retryability semantics. The status
//! code drives the gateway's retry behavior: 2xx acknowledges, 4xx stops
//! redelivery, 5xx triggers redelivery.

use axum::http::StatusCode;
use thiserror::Error;

use crate::ports::StoreError;

/// Errors that occur during webhook processing.
#[derive(Debug, Error)]
pub enum WebhookError {
    /// Webhook signing secret is not configured. Fail closed: no event
    /// is ever processed without verification.
    #[error("Webhook secret not configured")]
    SecretNotConfigured,

    /// Signature header was absent from the request.
    #[error("Missing signature header")]
    MissingSignature,

    /// Webhook signature verification failed.
    #[error("Invalid signature")]
    InvalidSignature,

    /// Failed to parse webhook payload.
    #[error("Parse error: {0}")]
    ParseError(String),

    /// Document store operation failed.
    #[error("Storage error: {0}")]
    Storage(String),
}

impl WebhookError {
    /// Returns true if the gateway should retry delivering this webhook.
    ///
    /// Only transient infrastructure failures are retryable; a bad
    /// signature or malformed body will never become valid.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            WebhookError::Storage(_) | WebhookError::SecretNotConfigured
        )
    }

    /// Maps the error to an appropriate HTTP status code.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // Fail closed, server side - gateway will retry once the
            // deployment is fixed
            WebhookError::SecretNotConfigured => StatusCode::INTERNAL_SERVER_ERROR,

            // Authentication / request failures - don't retry
            WebhookError::MissingSignature
            | WebhookError::InvalidSignature
            | WebhookError::ParseError(_) => StatusCode::BAD_REQUEST,

            // Transient infrastructure failure - gateway retries
            WebhookError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for WebhookError {
    fn from(err: StoreError) -> Self {
        WebhookError::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ══════════════════════════════════════════════════════════════
    // Retryability Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn storage_error_is_retryable() {
        let err = WebhookError::Storage("connection failed".to_string());
        assert!(err.is_retryable());
    }

    #[test]
    fn missing_secret_is_retryable() {
        // Redelivery succeeds once the deployment is fixed
        let err = WebhookError::SecretNotConfigured;
        assert!(err.is_retryable());
    }

    #[test]
    fn invalid_signature_is_not_retryable() {
        let err = WebhookError::InvalidSignature;
        assert!(!err.is_retryable());
    }

    #[test]
    fn parse_error_is_not_retryable() {
        let err = WebhookError::ParseError("bad json".to_string());
        assert!(!err.is_retryable());
    }

    // ══════════════════════════════════════════════════════════════
    // Status Code Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn missing_secret_returns_internal_error() {
        let err = WebhookError::SecretNotConfigured;
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn invalid_signature_returns_bad_request() {
        let err = WebhookError::InvalidSignature;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn missing_signature_returns_bad_request() {
        let err = WebhookError::MissingSignature;
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn parse_error_returns_bad_request() {
        let err = WebhookError::ParseError("syntax error".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn storage_error_returns_internal_error() {
        let err = WebhookError::Storage("transaction aborted".to_string());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_error_converts_to_storage_variant() {
        let err: WebhookError = StoreError::Unavailable("down".to_string()).into();
        assert!(matches!(err, WebhookError::Storage(_)));
    }
}
