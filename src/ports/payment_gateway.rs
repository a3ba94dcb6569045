//! PaymentGateway port - Order creation against the payment provider.
//!
//! Orders are created server-side so that the authenticated user's
//! identifier can be stashed in the order notes. The gateway echoes those
//! notes back inside webhook events, which is how a captured payment is
//! attributed to a user.

use async_trait::async_trait;
use std::collections::HashMap;
use thiserror::Error;

/// Request to create a payment order.
#[derive(Debug, Clone)]
pub struct CreateOrderRequest {
    /// Amount in minor currency units (e.g., paise for INR).
    pub amount: i64,
    /// Three-letter currency code.
    pub currency: String,
    /// Unique receipt string for reconciliation.
    pub receipt: String,
    /// Opaque notes echoed back in webhook events. Must carry `userId`.
    pub notes: HashMap<String, String>,
}

/// Order as created by the gateway.
#[derive(Debug, Clone)]
pub struct GatewayOrder {
    pub id: String,
    pub amount: i64,
    pub currency: String,
    pub status: String,
}

/// Errors surfaced by payment gateway implementations.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Gateway request failed: {0}")]
    Network(String),

    #[error("Gateway returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected gateway response: {0}")]
    InvalidResponse(String),
}

impl GatewayError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        GatewayError::Network(message.into())
    }

    /// Creates an API error from an HTTP status and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        GatewayError::Api {
            status,
            message: message.into(),
        }
    }
}

/// Port for the payment provider's order API.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Creates an order, returning the gateway's order record.
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, GatewayError>;
}
