//! HTTP handlers for billing endpoints.
//!
//! These handlers connect axum routes to application layer command/query
//! handlers. The webhook handler takes the body as raw `Bytes`: the
//! signature covers the exact bytes Razorpay sent, so nothing may parse
//! or reserialize the body before verification.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Json, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;

use crate::application::handlers::billing::{
    CreateOrderCommand, CreateOrderHandler, GetEntitlementHandler, GetEntitlementQuery,
    HandlePaymentWebhookCommand, HandlePaymentWebhookHandler,
};
use crate::domain::billing::RazorpayWebhookVerifier;
use crate::domain::foundation::UserId;
use crate::ports::{DocumentStore, PaymentGateway};

use super::super::{ApiError, ErrorResponse};
use super::dto::{CreateOrderRequest, CreateOrderResponse, EntitlementResponse, WebhookAckResponse};

/// Header carrying the webhook signature.
const SIGNATURE_HEADER: &str = "x-razorpay-signature";

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for billing routes.
///
/// Dependencies are explicitly constructed at startup and injected here;
/// handlers are built per request from the Arc-wrapped ports, which lets
/// tests substitute fakes.
#[derive(Clone)]
pub struct BillingAppState {
    pub document_store: Arc<dyn DocumentStore>,
    pub payment_gateway: Arc<dyn PaymentGateway>,
    /// `None` when no webhook secret is configured; the webhook endpoint
    /// then fails closed.
    pub webhook_verifier: Option<RazorpayWebhookVerifier>,
}

impl BillingAppState {
    /// Create handlers on demand from the shared state.
    pub fn webhook_handler(&self) -> HandlePaymentWebhookHandler {
        HandlePaymentWebhookHandler::new(
            self.webhook_verifier.clone(),
            self.document_store.clone(),
        )
    }

    pub fn create_order_handler(&self) -> CreateOrderHandler {
        CreateOrderHandler::new(self.payment_gateway.clone())
    }

    pub fn entitlement_handler(&self) -> GetEntitlementHandler {
        GetEntitlementHandler::new(self.document_store.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context (would come from auth middleware in production)
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from the request.
///
/// In production this would be extracted from a verified session token
/// by auth middleware. For now, uses a header-based extraction for
/// development/testing.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get("X-User-Id")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(AuthenticationRequired)?;

            Ok(AuthenticatedUser { user_id })
        })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/billing/orders - Create a payment order
pub async fn create_order(
    State(state): State<BillingAppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateOrderRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let handler = state.create_order_handler();
    let cmd = CreateOrderCommand {
        user_id: user.user_id,
        amount: request.amount,
        currency: request.currency,
    };

    let result = handler.handle(cmd).await?;

    let response = CreateOrderResponse {
        order_id: result.order_id,
    };

    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/billing/entitlement - Read the current user's premium flag
pub async fn get_entitlement(
    State(state): State<BillingAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.entitlement_handler();
    let query = GetEntitlementQuery {
        user_id: user.user_id,
    };

    let result = handler.handle(query).await?;

    Ok(Json(EntitlementResponse::from(result)))
}

/// POST /api/webhooks/razorpay - Handle Razorpay webhook events
///
/// No user authentication: the request is authenticated by its
/// signature. Status codes drive the provider's retry behavior, so
/// every acknowledged outcome returns 200 and only transient failures
/// return 5xx.
pub async fn handle_razorpay_webhook(
    State(state): State<BillingAppState>,
    headers: HeaderMap,
    body: Bytes,
) -> axum::response::Response {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let handler = state.webhook_handler();
    let cmd = HandlePaymentWebhookCommand {
        payload: body.to_vec(),
        signature,
    };

    match handler.handle(cmd).await {
        Ok(outcome) => {
            let ack = WebhookAckResponse::from(&outcome);
            (StatusCode::OK, Json(ack)).into_response()
        }
        Err(err) => {
            tracing::warn!(error = %err, retryable = err.is_retryable(), "Webhook rejected");
            let body = ErrorResponse::new("WEBHOOK_REJECTED", err.to_string());
            (err.status_code(), Json(body)).into_response()
        }
    }
}
