//! Billing domain module.
//!
//! Razorpay webhook handling: signature verification over the raw
//! request bytes, event-type dispatch, and the idempotent payment ledger
//! that converts a captured payment into exactly-once durable state.
//!
//! # Module Structure
//!
//! - `event` - Razorpay webhook event envelope and payment entity
//! - `webhook_verifier` - HMAC-SHA256 signature verification
//! - `webhook_errors` - Error taxonomy with HTTP status mapping
//! - `ledger` - Idempotent transaction + entitlement commit

mod event;
mod ledger;
mod webhook_errors;
mod webhook_verifier;

pub use event::{PaymentEntity, RazorpayEvent, RazorpayEventType};
pub use ledger::{
    Entitlement, LedgerOutcome, PaymentCapture, PaymentLedger, TransactionRecord,
    TRANSACTIONS_COLLECTION, USERS_COLLECTION,
};
pub use webhook_errors::WebhookError;
pub use webhook_verifier::RazorpayWebhookVerifier;

#[cfg(test)]
pub use webhook_verifier::sign_payload;
