//! Billing HTTP adapter.

mod dto;
mod handlers;
mod routes;

pub use handlers::{AuthenticatedUser, BillingAppState};
pub use routes::{billing_router, billing_routes, webhook_routes};
