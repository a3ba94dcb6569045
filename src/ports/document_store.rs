//! DocumentStore port - Transactional key-value document storage.
//!
//! Documents are JSON values addressed by `collection/key`. Beyond plain
//! reads and writes, the port exposes a single conditional multi-write
//! commit, which is the only concurrency-correctness mechanism the
//! billing ledger relies on.
//!
//! ## Atomicity Contract
//!
//! `commit_atomic` applies every write or none of them, and evaluates the
//! guard with serializable semantics: two concurrent commits guarded by
//! `NotExists` on the same document can never both observe "absent".
//! Implementations may serialize via a unique-constraint insert that
//! fails the loser.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Address of a document: a collection name plus a key within it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DocumentKey {
    pub collection: String,
    pub key: String,
}

impl DocumentKey {
    /// Creates a new document key.
    pub fn new(collection: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
        }
    }

    /// Returns the `collection/key` path, for logging.
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection, self.key)
    }
}

/// A single write within an atomic commit.
#[derive(Debug, Clone)]
pub enum WriteOp {
    /// Replace the document wholesale, creating it if absent.
    Put { doc: DocumentKey, value: Value },

    /// Shallow-merge top-level fields into the document, creating it
    /// from the patch if absent. Both the patch and any existing
    /// document must be JSON objects.
    Merge { doc: DocumentKey, value: Value },
}

impl WriteOp {
    /// Creates a put (replace) write.
    pub fn put(doc: DocumentKey, value: Value) -> Self {
        WriteOp::Put { doc, value }
    }

    /// Creates a merge write.
    pub fn merge(doc: DocumentKey, value: Value) -> Self {
        WriteOp::Merge { doc, value }
    }

    /// Returns the document this write targets.
    pub fn doc(&self) -> &DocumentKey {
        match self {
            WriteOp::Put { doc, .. } | WriteOp::Merge { doc, .. } => doc,
        }
    }
}

/// Precondition evaluated inside the atomic commit.
#[derive(Debug, Clone)]
pub enum Guard {
    /// The commit proceeds only if the document does not exist.
    NotExists(DocumentKey),
}

/// Outcome of an atomic commit attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitResult {
    /// Guard held; all writes were applied.
    Committed,
    /// Guard failed; nothing was applied.
    GuardFailed,
}

/// Errors surfaced by document store implementations.
///
/// All variants are transient from the caller's perspective: the
/// operation may succeed if retried later.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Document store unavailable: {0}")]
    Unavailable(String),

    #[error("Transaction aborted: {0}")]
    TransactionAborted(String),

    #[error("Document serialization failed: {0}")]
    Serialization(String),
}

/// Port for the shared key-value document store.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document, returning `None` if absent.
    async fn get(&self, doc: &DocumentKey) -> Result<Option<Value>, StoreError>;

    /// Writes a document unconditionally, replacing any existing value.
    async fn set(&self, doc: &DocumentKey, value: Value) -> Result<(), StoreError>;

    /// Atomically applies all writes iff the guard holds.
    async fn commit_atomic(
        &self,
        guard: Guard,
        writes: Vec<WriteOp>,
    ) -> Result<CommitResult, StoreError>;
}
