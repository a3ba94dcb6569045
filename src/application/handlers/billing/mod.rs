//! Billing handlers.
//!
//! ## Commands
//! - Processing Razorpay payment webhooks (verify, dispatch, record)
//! - Creating payment orders with user attribution notes
//!
//! ## Queries
//! - Reading a user's entitlement

mod create_order;
mod get_entitlement;
mod handle_payment_webhook;

pub use create_order::{CreateOrderCommand, CreateOrderHandler, CreateOrderResult};
pub use get_entitlement::{EntitlementView, GetEntitlementHandler, GetEntitlementQuery};
pub use handle_payment_webhook::{
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler, WebhookOutcome,
};
