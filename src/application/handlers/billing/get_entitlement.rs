//! GetEntitlementHandler - Query handler for a user's premium flag.
//!
//! Reads the billing fields of the user document. A missing document or
//! missing fields mean "not premium"; this query never mutates anything.

use std::sync::Arc;

use crate::domain::billing::{Entitlement, USERS_COLLECTION};
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{DocumentKey, DocumentStore};

/// Query for a user's entitlement.
#[derive(Debug, Clone)]
pub struct GetEntitlementQuery {
    pub user_id: UserId,
}

/// A user's entitlement as exposed to the API.
#[derive(Debug, Clone)]
pub struct EntitlementView {
    pub is_premium: bool,
    pub last_payment_id: Option<String>,
}

/// Handler for entitlement queries.
pub struct GetEntitlementHandler {
    store: Arc<dyn DocumentStore>,
}

impl GetEntitlementHandler {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    pub async fn handle(&self, query: GetEntitlementQuery) -> Result<EntitlementView, DomainError> {
        let doc = DocumentKey::new(USERS_COLLECTION, query.user_id.as_str());

        let entitlement = match self
            .store
            .get(&doc)
            .await
            .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?
        {
            Some(value) => serde_json::from_value::<Entitlement>(value)
                .map_err(|e| DomainError::new(ErrorCode::DatabaseError, e.to_string()))?,
            None => Entitlement::default(),
        };

        Ok(EntitlementView {
            is_premium: entitlement.is_premium,
            last_payment_id: entitlement.last_payment_id.map(|id| id.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemoryDocumentStore;
    use serde_json::json;

    fn user() -> UserId {
        UserId::new("user_1").unwrap()
    }

    #[tokio::test]
    async fn unknown_user_is_not_premium() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let handler = GetEntitlementHandler::new(store);

        let view = handler
            .handle(GetEntitlementQuery { user_id: user() })
            .await
            .unwrap();

        assert!(!view.is_premium);
        assert!(view.last_payment_id.is_none());
    }

    #[tokio::test]
    async fn premium_user_is_reported_with_last_payment() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store
            .set(
                &DocumentKey::new(USERS_COLLECTION, "user_1"),
                json!({"isPremium": true, "lastPaymentId": "pay_123"}),
            )
            .await
            .unwrap();
        let handler = GetEntitlementHandler::new(store);

        let view = handler
            .handle(GetEntitlementQuery { user_id: user() })
            .await
            .unwrap();

        assert!(view.is_premium);
        assert_eq!(view.last_payment_id.as_deref(), Some("pay_123"));
    }

    #[tokio::test]
    async fn user_document_without_billing_fields_is_not_premium() {
        let store = Arc::new(InMemoryDocumentStore::new());
        store
            .set(
                &DocumentKey::new(USERS_COLLECTION, "user_1"),
                json!({"displayName": "someone"}),
            )
            .await
            .unwrap();
        let handler = GetEntitlementHandler::new(store);

        let view = handler
            .handle(GetEntitlementQuery { user_id: user() })
            .await
            .unwrap();

        assert!(!view.is_premium);
    }
}
