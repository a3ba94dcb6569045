//! Axum router configuration for billing endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{create_order, get_entitlement, handle_razorpay_webhook, BillingAppState};

/// Create the billing API router.
///
/// # Routes
///
/// ## User Endpoints (require authentication)
/// - `POST /orders` - Create a payment order
/// - `GET /entitlement` - Read the current user's premium flag
pub fn billing_routes() -> Router<BillingAppState> {
    Router::new()
        .route("/orders", post(create_order))
        .route("/entitlement", get(get_entitlement))
}

/// Create the webhook router.
///
/// Separate from the user-facing billing routes because webhooks carry
/// no user authentication; they are verified via signature.
///
/// # Routes
/// - `POST /razorpay` - Handle Razorpay webhooks
pub fn webhook_routes() -> Router<BillingAppState> {
    Router::new().route("/razorpay", post(handle_razorpay_webhook))
}

/// Create the complete billing module router, suitable for mounting at
/// the API root.
pub fn billing_router() -> Router<BillingAppState> {
    Router::new()
        .nest("/billing", billing_routes())
        .nest("/webhooks", webhook_routes())
}
