//! CreateOrderHandler - Command handler for creating payment orders.
//!
//! Orders are created server-side so the authenticated user's identifier
//! can be stashed in the order notes. The gateway echoes those notes back
//! in webhook events, which is how a captured payment is later attributed
//! to the user. Only the order identifier is returned to the client.

use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{CreateOrderRequest, PaymentGateway};

/// Default currency when the client does not specify one.
const DEFAULT_CURRENCY: &str = "INR";

/// Command to create a payment order.
#[derive(Debug, Clone)]
pub struct CreateOrderCommand {
    pub user_id: UserId,
    /// Amount in minor currency units.
    pub amount: i64,
    pub currency: Option<String>,
}

/// Result of order creation.
#[derive(Debug, Clone)]
pub struct CreateOrderResult {
    pub order_id: String,
}

/// Handler for creating payment orders.
pub struct CreateOrderHandler {
    gateway: Arc<dyn PaymentGateway>,
}

impl CreateOrderHandler {
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    pub async fn handle(&self, cmd: CreateOrderCommand) -> Result<CreateOrderResult, DomainError> {
        if cmd.amount <= 0 {
            return Err(DomainError::validation("amount", "Amount must be positive"));
        }

        let receipt = format!(
            "receipt_user_{}_{}",
            cmd.user_id.as_str(),
            Uuid::new_v4().simple()
        );

        let mut notes = HashMap::new();
        notes.insert("userId".to_string(), cmd.user_id.to_string());

        let request = CreateOrderRequest {
            amount: cmd.amount,
            currency: cmd.currency.unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
            receipt,
            notes,
        };

        let order = self.gateway.create_order(request).await.map_err(|e| {
            tracing::error!(error = %e, user_id = %cmd.user_id, "Order creation failed");
            DomainError::new(ErrorCode::PaymentGatewayError, "Could not create payment order")
        })?;

        tracing::info!(order_id = %order.id, user_id = %cmd.user_id, "Payment order created");

        Ok(CreateOrderResult { order_id: order.id })
    }
}
