//! HTTP DTOs for billing endpoints.
//!
//! These types define the JSON request/response structure for the
//! billing API and the webhook acknowledgment body.

use serde::{Deserialize, Serialize};

use crate::application::handlers::billing::{EntitlementView, WebhookOutcome};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to create a payment order.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateOrderRequest {
    /// Amount in minor currency units (e.g., paise for INR).
    pub amount: i64,
    /// Three-letter currency code; defaults to INR.
    #[serde(default)]
    pub currency: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response after creating an order. Only the id is exposed; amounts and
/// notes stay server-side.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderResponse {
    pub order_id: String,
}

/// Response for the entitlement query.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementResponse {
    pub is_premium: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_payment_id: Option<String>,
}

impl From<EntitlementView> for EntitlementResponse {
    fn from(view: EntitlementView) -> Self {
        Self {
            is_premium: view.is_premium,
            last_payment_id: view.last_payment_id,
        }
    }
}

/// Acknowledgment body returned to the webhook provider.
#[derive(Debug, Clone, Serialize)]
pub struct WebhookAckResponse {
    pub received: bool,
    pub result: &'static str,
}

impl From<&WebhookOutcome> for WebhookAckResponse {
    fn from(outcome: &WebhookOutcome) -> Self {
        let result = match outcome {
            WebhookOutcome::Processed { .. } => "processed",
            WebhookOutcome::AlreadyProcessed { .. } => "duplicate",
            WebhookOutcome::Unattributed { .. } => "unattributed",
            WebhookOutcome::Ignored { .. } => "ignored",
        };
        Self {
            received: true,
            result,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entitlement_response_omits_absent_payment_id() {
        let response = EntitlementResponse {
            is_premium: false,
            last_payment_id: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["isPremium"], false);
        assert!(json.get("lastPaymentId").is_none());
    }

    #[test]
    fn webhook_ack_maps_outcomes_to_results() {
        let processed = WebhookOutcome::Processed {
            payment_id: "pay_1".to_string(),
            user_id: "user_1".to_string(),
        };
        let ack = WebhookAckResponse::from(&processed);
        assert!(ack.received);
        assert_eq!(ack.result, "processed");

        let duplicate = WebhookOutcome::AlreadyProcessed {
            payment_id: "pay_1".to_string(),
        };
        assert_eq!(WebhookAckResponse::from(&duplicate).result, "duplicate");
    }
}
