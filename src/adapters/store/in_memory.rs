//! In-memory document store.
//!
//! Used in tests and local development. The whole commit runs under a
//! single write lock, which trivially gives the guard-plus-writes the
//! serializable semantics the port requires.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::ports::{CommitResult, DocumentKey, DocumentStore, Guard, StoreError, WriteOp};

/// In-memory implementation of the DocumentStore port.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    docs: RwLock<HashMap<DocumentKey, Value>>,
}

impl InMemoryDocumentStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of documents, for test assertions.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    /// Returns true if the store holds no documents.
    pub async fn is_empty(&self) -> bool {
        self.docs.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn get(&self, doc: &DocumentKey) -> Result<Option<Value>, StoreError> {
        Ok(self.docs.read().await.get(doc).cloned())
    }

    async fn set(&self, doc: &DocumentKey, value: Value) -> Result<(), StoreError> {
        self.docs.write().await.insert(doc.clone(), value);
        Ok(())
    }

    async fn commit_atomic(
        &self,
        guard: Guard,
        writes: Vec<WriteOp>,
    ) -> Result<CommitResult, StoreError> {
        let mut docs = self.docs.write().await;

        let Guard::NotExists(ref guarded) = guard;
        if docs.contains_key(guarded) {
            return Ok(CommitResult::GuardFailed);
        }

        // Stage every write before touching the map, so a bad merge
        // cannot leave a partial commit behind
        let mut staged: Vec<(DocumentKey, Value)> = Vec::new();
        for write in writes {
            match write {
                WriteOp::Put { doc, value } => staged.push((doc, value)),
                WriteOp::Merge { doc, value } => {
                    let patch = value.as_object().cloned().ok_or_else(|| {
                        StoreError::Serialization("merge patch must be an object".to_string())
                    })?;
                    let base = staged
                        .iter()
                        .rev()
                        .find(|(d, _)| *d == doc)
                        .map(|(_, v)| v.clone())
                        .or_else(|| docs.get(&doc).cloned())
                        .unwrap_or_else(|| Value::Object(Default::default()));
                    let mut merged = base.as_object().cloned().ok_or_else(|| {
                        StoreError::Serialization("merge target is not an object".to_string())
                    })?;
                    for (k, v) in patch {
                        merged.insert(k, v);
                    }
                    staged.push((doc, Value::Object(merged)));
                }
            }
        }

        for (doc, value) in staged {
            docs.insert(doc, value);
        }

        Ok(CommitResult::Committed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    fn doc(key: &str) -> DocumentKey {
        DocumentKey::new("transactions", key)
    }

    #[tokio::test]
    async fn get_returns_none_for_missing_document() {
        let store = InMemoryDocumentStore::new();
        assert!(store.get(&doc("pay_1")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn set_then_get_roundtrips() {
        let store = InMemoryDocumentStore::new();
        store.set(&doc("pay_1"), json!({"amount": 100})).await.unwrap();

        let value = store.get(&doc("pay_1")).await.unwrap().unwrap();
        assert_eq!(value["amount"], 100);
    }

    #[tokio::test]
    async fn commit_applies_all_writes_when_guard_holds() {
        let store = InMemoryDocumentStore::new();
        let user = DocumentKey::new("users", "user_1");

        let result = store
            .commit_atomic(
                Guard::NotExists(doc("pay_1")),
                vec![
                    WriteOp::put(doc("pay_1"), json!({"amount": 100})),
                    WriteOp::merge(user.clone(), json!({"isPremium": true})),
                ],
            )
            .await
            .unwrap();

        assert_eq!(result, CommitResult::Committed);
        assert!(store.get(&doc("pay_1")).await.unwrap().is_some());
        assert_eq!(store.get(&user).await.unwrap().unwrap()["isPremium"], true);
    }

    #[tokio::test]
    async fn commit_applies_nothing_when_guard_fails() {
        let store = InMemoryDocumentStore::new();
        store.set(&doc("pay_1"), json!({"existing": true})).await.unwrap();
        let user = DocumentKey::new("users", "user_1");

        let result = store
            .commit_atomic(
                Guard::NotExists(doc("pay_1")),
                vec![
                    WriteOp::put(doc("pay_1"), json!({"replaced": true})),
                    WriteOp::merge(user.clone(), json!({"isPremium": true})),
                ],
            )
            .await
            .unwrap();

        assert_eq!(result, CommitResult::GuardFailed);
        // Neither write was applied
        let original = store.get(&doc("pay_1")).await.unwrap().unwrap();
        assert_eq!(original["existing"], true);
        assert!(store.get(&user).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn merge_preserves_unrelated_fields() {
        let store = InMemoryDocumentStore::new();
        let user = DocumentKey::new("users", "user_1");
        store
            .set(&user, json!({"displayName": "someone", "isPremium": false}))
            .await
            .unwrap();

        store
            .commit_atomic(
                Guard::NotExists(doc("pay_1")),
                vec![WriteOp::merge(
                    user.clone(),
                    json!({"isPremium": true, "lastPaymentId": "pay_1"}),
                )],
            )
            .await
            .unwrap();

        let value = store.get(&user).await.unwrap().unwrap();
        assert_eq!(value["displayName"], "someone");
        assert_eq!(value["isPremium"], true);
        assert_eq!(value["lastPaymentId"], "pay_1");
    }

    #[tokio::test]
    async fn merge_creates_document_when_absent() {
        let store = InMemoryDocumentStore::new();
        let user = DocumentKey::new("users", "user_1");

        store
            .commit_atomic(
                Guard::NotExists(doc("pay_1")),
                vec![WriteOp::merge(user.clone(), json!({"isPremium": true}))],
            )
            .await
            .unwrap();

        assert_eq!(store.get(&user).await.unwrap().unwrap()["isPremium"], true);
    }

    #[tokio::test]
    async fn concurrent_commits_with_same_guard_admit_exactly_one() {
        let store = Arc::new(InMemoryDocumentStore::new());

        let mut tasks = Vec::new();
        for i in 0..16 {
            let store = store.clone();
            tasks.push(tokio::spawn(async move {
                store
                    .commit_atomic(
                        Guard::NotExists(doc("pay_race")),
                        vec![WriteOp::put(doc("pay_race"), json!({"winner": i}))],
                    )
                    .await
                    .unwrap()
            }));
        }

        let mut committed = 0;
        for task in tasks {
            if task.await.unwrap() == CommitResult::Committed {
                committed += 1;
            }
        }

        assert_eq!(committed, 1);
        assert_eq!(store.len().await, 1);
    }
}
