//! HandlePaymentWebhookHandler - Command handler for Razorpay webhooks.
//!
//! Composes the three webhook stages in sequence: signature verification
//! over the raw bytes, event-type dispatch, and the idempotent ledger
//! write. Every outcome that should stop gateway redelivery maps to a
//! success; only transient infrastructure failures surface as errors.

use std::sync::Arc;

use crate::domain::billing::{
    LedgerOutcome, PaymentCapture, PaymentLedger, RazorpayEvent, RazorpayEventType,
    RazorpayWebhookVerifier, WebhookError,
};
use crate::domain::foundation::{OrderId, PaymentId, UserId};
use crate::ports::DocumentStore;

/// Command to handle a payment webhook delivery.
#[derive(Debug, Clone)]
pub struct HandlePaymentWebhookCommand {
    /// Raw request body, exactly as received. The signature covers these
    /// bytes; nothing upstream may reparse or reserialize them.
    pub payload: Vec<u8>,
    /// Value of the signature header, if present.
    pub signature: Option<String>,
}

/// Outcome of webhook processing. All variants acknowledge the delivery.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WebhookOutcome {
    /// Payment recorded and entitlement applied.
    Processed { payment_id: String, user_id: String },
    /// Redelivery of an already-recorded payment; no state change.
    AlreadyProcessed { payment_id: String },
    /// Captured payment without a `userId` note; logged and skipped.
    Unattributed { payment_id: String },
    /// Event type this system does not act on.
    Ignored { event_type: String },
}

/// Handler for processing Razorpay webhook deliveries.
pub struct HandlePaymentWebhookHandler {
    verifier: Option<RazorpayWebhookVerifier>,
    ledger: PaymentLedger,
}

impl HandlePaymentWebhookHandler {
    /// Creates a handler. `verifier` is `None` when no webhook secret is
    /// configured, in which case every delivery fails closed.
    pub fn new(verifier: Option<RazorpayWebhookVerifier>, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            verifier,
            ledger: PaymentLedger::new(store),
        }
    }

    /// Processes one webhook delivery.
    ///
    /// # Errors
    ///
    /// - `SecretNotConfigured` - no secret; fail closed, never skip
    ///   verification
    /// - `MissingSignature` / `InvalidSignature` - authentication failed
    /// - `ParseError` - body is not a valid event
    /// - `Storage` - ledger commit failed; gateway should redeliver
    pub async fn handle(
        &self,
        cmd: HandlePaymentWebhookCommand,
    ) -> Result<WebhookOutcome, WebhookError> {
        // 1. Verify the signature over the raw bytes
        let verifier = self
            .verifier
            .as_ref()
            .ok_or(WebhookError::SecretNotConfigured)?;
        let signature = cmd
            .signature
            .as_deref()
            .ok_or(WebhookError::MissingSignature)?;
        verifier.verify(&cmd.payload, signature)?;

        // 2. Parse the event; keep the raw value for the audit record
        let raw_event: serde_json::Value = serde_json::from_slice(&cmd.payload)
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;
        let event: RazorpayEvent = serde_json::from_value(raw_event.clone())
            .map_err(|e| WebhookError::ParseError(e.to_string()))?;

        // 3. Dispatch by event type
        match event.parsed_type() {
            RazorpayEventType::PaymentCaptured => {
                self.handle_payment_captured(&event, raw_event).await
            }
            other => {
                tracing::debug!(
                    event_type = %event.event_type,
                    parsed = other.as_str(),
                    "Ignoring webhook event"
                );
                Ok(WebhookOutcome::Ignored {
                    event_type: event.event_type.clone(),
                })
            }
        }
    }

    async fn handle_payment_captured(
        &self,
        event: &RazorpayEvent,
        raw_event: serde_json::Value,
    ) -> Result<WebhookOutcome, WebhookError> {
        let entity = event
            .payment_entity()
            .ok_or_else(|| WebhookError::ParseError("payment entity missing".to_string()))?;

        // Missing attribution is a data gap between order creation and
        // webhook delivery. Acknowledge so the gateway does not retry
        // into the same gap forever.
        let user_id = match entity.user_id_note() {
            Some(uid) => UserId::new(uid)
                .map_err(|e| WebhookError::ParseError(e.to_string()))?,
            None => {
                tracing::warn!(
                    payment_id = %entity.id,
                    order_id = %entity.order_id,
                    "Captured payment has no userId note; skipping ledger write"
                );
                return Ok(WebhookOutcome::Unattributed {
                    payment_id: entity.id.clone(),
                });
            }
        };

        let capture = PaymentCapture {
            user_id: user_id.clone(),
            order_id: OrderId::new(entity.order_id.clone())
                .map_err(|e| WebhookError::ParseError(e.to_string()))?,
            payment_id: PaymentId::new(entity.id.clone())
                .map_err(|e| WebhookError::ParseError(e.to_string()))?,
            amount: entity.amount,
            currency: entity.currency.clone(),
            status: entity.status.clone(),
            raw_event,
        };

        match self.ledger.apply(capture).await? {
            LedgerOutcome::Recorded => {
                tracing::info!(
                    payment_id = %entity.id,
                    user_id = %user_id,
                    "Payment recorded and entitlement applied"
                );
                Ok(WebhookOutcome::Processed {
                    payment_id: entity.id.clone(),
                    user_id: user_id.to_string(),
                })
            }
            LedgerOutcome::AlreadyRecorded => {
                tracing::info!(payment_id = %entity.id, "Duplicate delivery, no-op");
                Ok(WebhookOutcome::AlreadyProcessed {
                    payment_id: entity.id.clone(),
                })
            }
        }
    }
}
