//! Razorpay API client.
//!
//! Implements the `PaymentGateway` port against Razorpay's Orders API.
//! Authentication is HTTP basic auth with the key id as username and the
//! key secret as password.
//!
//! # Configuration
//!
//! ```ignore
//! let config = RazorpayClientConfig::new(key_id, key_secret);
//! let client = RazorpayClient::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

use crate::ports::{CreateOrderRequest, GatewayError, GatewayOrder, PaymentGateway};

/// Razorpay API configuration.
#[derive(Clone)]
pub struct RazorpayClientConfig {
    /// Key id (rzp_test_... or rzp_live_...).
    key_id: String,

    /// Key secret paired with the key id.
    key_secret: SecretString,

    /// Base URL for the Razorpay API (default: https://api.razorpay.com).
    api_base_url: String,

    /// Request timeout.
    timeout: Duration,
}

impl RazorpayClientConfig {
    /// Creates a new configuration.
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self {
            key_id: key_id.into(),
            key_secret: SecretString::new(key_secret.into()),
            api_base_url: "https://api.razorpay.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }

    /// Sets a custom API base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Razorpay payment gateway client.
pub struct RazorpayClient {
    config: RazorpayClientConfig,
    http_client: reqwest::Client,
}

impl RazorpayClient {
    /// Creates a new client with the given configuration.
    pub fn new(config: RazorpayClientConfig) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            http_client,
        }
    }

    fn orders_url(&self) -> String {
        format!("{}/v1/orders", self.config.api_base_url)
    }
}

/// Request body for the Orders API.
#[derive(Debug, Serialize)]
struct OrderRequestBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
    notes: &'a HashMap<String, String>,
}

/// Order object returned by the Orders API.
#[derive(Debug, Deserialize)]
struct OrderResponseBody {
    id: String,
    amount: i64,
    currency: String,
    status: String,
}

/// Error envelope returned by the Razorpay API.
#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ApiErrorDetail {
    #[serde(default)]
    description: String,
}

#[async_trait]
impl PaymentGateway for RazorpayClient {
    async fn create_order(&self, request: CreateOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let body = OrderRequestBody {
            amount: request.amount,
            currency: &request.currency,
            receipt: &request.receipt,
            notes: &request.notes,
        };

        let response = self
            .http_client
            .post(self.orders_url())
            .basic_auth(
                &self.config.key_id,
                Some(self.config.key_secret.expose_secret()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    GatewayError::network("Request timed out")
                } else {
                    GatewayError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<ApiErrorBody>()
                .await
                .map(|e| e.error.description)
                .unwrap_or_else(|_| "Unknown gateway error".to_string());
            tracing::warn!(status = status.as_u16(), "Order creation rejected by gateway");
            return Err(GatewayError::api(status.as_u16(), message));
        }

        let order: OrderResponseBody = response
            .json()
            .await
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;

        Ok(GatewayOrder {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
            status: order.status,
        })
    }
}
