//! Idempotent payment ledger.
//!
//! Converts a validated payment-captured event into exactly-once durable
//! state: one transaction record per payment identifier, plus the user's
//! entitlement flag, committed together or not at all.
//!
//! ## Idempotence
//!
//! The gateway delivers events at least once, and concurrent deliveries
//! of the same payment are possible. The payment identifier is the
//! deduplication key:
//!
//! 1. Fast path: the transaction record already exists, so the delivery
//!    is a redelivery and collapses to a no-op success.
//! 2. Otherwise a single atomic commit guarded by `NotExists` on the
//!    transaction record writes the record and merges the entitlement.
//!    A concurrent duplicate loses the guard and also collapses to the
//!    no-op success path.
//!
//! Per payment identifier the state machine is `{unseen} -> {processed}`
//! with `{processed}` terminal and absorbing.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::foundation::{OrderId, PaymentId, Timestamp, UserId};
use crate::ports::{CommitResult, DocumentKey, DocumentStore, Guard, WriteOp};

use super::webhook_errors::WebhookError;

/// Collection holding one transaction record per payment identifier.
pub const TRANSACTIONS_COLLECTION: &str = "transactions";

/// Collection holding user account documents.
pub const USERS_COLLECTION: &str = "users";

/// A captured payment, validated and attributed, ready to be recorded.
#[derive(Debug, Clone)]
pub struct PaymentCapture {
    pub user_id: UserId,
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    /// Full event payload, stored for audit.
    pub raw_event: serde_json::Value,
}

/// Persisted transaction record, one per processed payment identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRecord {
    pub user_id: UserId,
    pub order_id: OrderId,
    pub payment_id: PaymentId,
    pub amount: i64,
    pub currency: String,
    pub status: String,
    /// Server-assigned creation time.
    pub created_at: Timestamp,
    /// Original event payload for audit.
    pub raw_event: serde_json::Value,
}

/// Billing fields of a user account document.
///
/// Other fields on the document are owned by other subsystems; the
/// ledger only ever merges these two.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Entitlement {
    pub is_premium: bool,
    pub last_payment_id: Option<PaymentId>,
}

/// Outcome of applying a capture to the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LedgerOutcome {
    /// First delivery: transaction recorded and entitlement applied.
    Recorded,
    /// Redelivery: a record for this payment identifier already exists.
    AlreadyRecorded,
}

/// Writes captured payments to the document store exactly once.
///
/// This is the sole owner of the transactions collection and of the
/// entitlement fields on user documents; no other code path mutates
/// either.
pub struct PaymentLedger {
    store: Arc<dyn DocumentStore>,
}

impl PaymentLedger {
    /// Creates a ledger over the given document store.
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Applies a captured payment, committing the transaction record and
    /// the entitlement update atomically.
    ///
    /// # Errors
    ///
    /// Returns `WebhookError::Storage` when the store fails; nothing is
    /// committed in that case and the caller must signal the gateway to
    /// redeliver.
    pub async fn apply(&self, capture: PaymentCapture) -> Result<LedgerOutcome, WebhookError> {
        let transaction_doc =
            DocumentKey::new(TRANSACTIONS_COLLECTION, capture.payment_id.as_str());

        // Fast path for redeliveries; the atomic guard below remains the
        // authority under concurrency.
        if self.store.get(&transaction_doc).await?.is_some() {
            return Ok(LedgerOutcome::AlreadyRecorded);
        }

        let record = TransactionRecord {
            user_id: capture.user_id.clone(),
            order_id: capture.order_id,
            payment_id: capture.payment_id.clone(),
            amount: capture.amount,
            currency: capture.currency,
            status: capture.status,
            created_at: Timestamp::now(),
            raw_event: capture.raw_event,
        };

        let record_value = serde_json::to_value(&record)
            .map_err(|e| WebhookError::Storage(format!("record serialization: {}", e)))?;

        let user_doc = DocumentKey::new(USERS_COLLECTION, capture.user_id.as_str());
        let entitlement_patch = json!({
            "isPremium": true,
            "lastPaymentId": capture.payment_id.as_str(),
        });

        let writes = vec![
            WriteOp::put(transaction_doc.clone(), record_value),
            WriteOp::merge(user_doc, entitlement_patch),
        ];

        match self
            .store
            .commit_atomic(Guard::NotExists(transaction_doc), writes)
            .await?
        {
            CommitResult::Committed => Ok(LedgerOutcome::Recorded),
            CommitResult::GuardFailed => Ok(LedgerOutcome::AlreadyRecorded),
        }
    }
}
