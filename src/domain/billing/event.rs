//! Razorpay webhook event types.
//!
//! Defines the structures for parsing Razorpay webhook payloads.
//! Only fields relevant to our processing are captured.

use serde::{Deserialize, Serialize};

/// Razorpay webhook event envelope (simplified).
///
/// Contains the essential fields needed for webhook processing.
/// Additional fields from Razorpay's full event schema are ignored.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RazorpayEvent {
    /// Type of event (e.g., "payment.captured").
    #[serde(rename = "event")]
    pub event_type: String,

    /// Event-specific payload.
    pub payload: EventPayload,

    /// Time at which the event was created (Unix timestamp).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<i64>,
}

/// Container for event-specific data.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventPayload {
    /// Present on payment.* events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentWrapper>,
}

/// Razorpay nests the payment entity one level down.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentWrapper {
    pub entity: PaymentEntity,
}

/// The payment entity carried by payment.* events.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaymentEntity {
    /// Payment identifier (pay_xxx format), unique per payment attempt.
    pub id: String,

    /// Order this payment belongs to (order_xxx format).
    pub order_id: String,

    /// Amount in minor currency units.
    pub amount: i64,

    /// Three-letter currency code.
    pub currency: String,

    /// Payment status as reported by the gateway.
    pub status: String,

    /// Opaque notes set at order creation and echoed back here.
    /// Razorpay serializes empty notes as `[]`, so this stays a raw value.
    #[serde(default)]
    pub notes: serde_json::Value,
}

impl PaymentEntity {
    /// Returns the `userId` note set at order creation, if present and
    /// non-empty.
    pub fn user_id_note(&self) -> Option<&str> {
        self.notes
            .get("userId")
            .and_then(|v| v.as_str())
            .filter(|s| !s.is_empty())
    }
}

impl RazorpayEvent {
    /// Returns the payment entity, if this event carries one.
    pub fn payment_entity(&self) -> Option<&PaymentEntity> {
        self.payload.payment.as_ref().map(|p| &p.entity)
    }

    /// Parse the event type into a known enum variant.
    pub fn parsed_type(&self) -> RazorpayEventType {
        RazorpayEventType::from_str(&self.event_type)
    }
}

/// Known Razorpay event types.
///
/// Only `payment.captured` is acted on; the rest are acknowledged
/// without side effects so the gateway does not retry them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RazorpayEventType {
    /// Payment captured successfully. The only event we act on.
    PaymentCaptured,
    /// Payment authorized but not yet captured.
    PaymentAuthorized,
    /// Payment attempt failed.
    PaymentFailed,
    /// All payments against an order completed.
    OrderPaid,
    /// Unknown or unhandled event type.
    Unknown,
}

impl RazorpayEventType {
    /// Parse event type from string.
    pub fn from_str(s: &str) -> Self {
        match s {
            "payment.captured" => Self::PaymentCaptured,
            "payment.authorized" => Self::PaymentAuthorized,
            "payment.failed" => Self::PaymentFailed,
            "order.paid" => Self::OrderPaid,
            _ => Self::Unknown,
        }
    }

    /// Convert to the Razorpay event type string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PaymentCaptured => "payment.captured",
            Self::PaymentAuthorized => "payment.authorized",
            Self::PaymentFailed => "payment.failed",
            Self::OrderPaid => "order.paid",
            Self::Unknown => "unknown",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn captured_payload() -> serde_json::Value {
        json!({
            "event": "payment.captured",
            "created_at": 1704067200,
            "payload": {
                "payment": {
                    "entity": {
                        "id": "pay_123",
                        "order_id": "order_1",
                        "amount": 49900,
                        "currency": "INR",
                        "status": "captured",
                        "notes": { "userId": "user_1" }
                    }
                }
            }
        })
    }

    // ══════════════════════════════════════════════════════════════
    // Deserialization Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn deserialize_captured_event() {
        let event: RazorpayEvent = serde_json::from_value(captured_payload()).unwrap();

        assert_eq!(event.event_type, "payment.captured");
        assert_eq!(event.created_at, Some(1704067200));
        let entity = event.payment_entity().unwrap();
        assert_eq!(entity.id, "pay_123");
        assert_eq!(entity.order_id, "order_1");
        assert_eq!(entity.amount, 49900);
        assert_eq!(entity.currency, "INR");
        assert_eq!(entity.status, "captured");
    }

    #[test]
    fn deserialize_event_without_payment_entity() {
        let event: RazorpayEvent = serde_json::from_value(json!({
            "event": "order.paid",
            "payload": {}
        }))
        .unwrap();

        assert!(event.payment_entity().is_none());
        assert_eq!(event.parsed_type(), RazorpayEventType::OrderPaid);
    }

    #[test]
    fn notes_as_empty_array_deserializes() {
        // Razorpay sends [] when no notes were set on the order.
        let event: RazorpayEvent = serde_json::from_value(json!({
            "event": "payment.captured",
            "payload": {
                "payment": {
                    "entity": {
                        "id": "pay_9",
                        "order_id": "order_9",
                        "amount": 100,
                        "currency": "INR",
                        "status": "captured",
                        "notes": []
                    }
                }
            }
        }))
        .unwrap();

        assert!(event.payment_entity().unwrap().user_id_note().is_none());
    }

    // ══════════════════════════════════════════════════════════════
    // Attribution Note Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn user_id_note_returns_value_when_present() {
        let event: RazorpayEvent = serde_json::from_value(captured_payload()).unwrap();
        let entity = event.payment_entity().unwrap();
        assert_eq!(entity.user_id_note(), Some("user_1"));
    }

    #[test]
    fn user_id_note_absent_when_notes_missing() {
        let mut payload = captured_payload();
        payload["payload"]["payment"]["entity"]
            .as_object_mut()
            .unwrap()
            .remove("notes");
        let event: RazorpayEvent = serde_json::from_value(payload).unwrap();
        assert!(event.payment_entity().unwrap().user_id_note().is_none());
    }

    #[test]
    fn user_id_note_treats_empty_string_as_missing() {
        let mut payload = captured_payload();
        payload["payload"]["payment"]["entity"]["notes"]["userId"] = json!("");
        let event: RazorpayEvent = serde_json::from_value(payload).unwrap();
        assert!(event.payment_entity().unwrap().user_id_note().is_none());
    }

    // ══════════════════════════════════════════════════════════════
    // Event Type Tests
    // ══════════════════════════════════════════════════════════════

    #[test]
    fn event_type_from_str_captured() {
        assert_eq!(
            RazorpayEventType::from_str("payment.captured"),
            RazorpayEventType::PaymentCaptured
        );
    }

    #[test]
    fn event_type_from_str_unknown() {
        assert_eq!(
            RazorpayEventType::from_str("refund.processed"),
            RazorpayEventType::Unknown
        );
    }

    #[test]
    fn event_type_as_str_roundtrip() {
        let types = [
            RazorpayEventType::PaymentCaptured,
            RazorpayEventType::PaymentAuthorized,
            RazorpayEventType::PaymentFailed,
            RazorpayEventType::OrderPaid,
        ];

        for event_type in types {
            let s = event_type.as_str();
            assert_eq!(RazorpayEventType::from_str(s), event_type);
        }
    }
}
