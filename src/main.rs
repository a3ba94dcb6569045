//! DateSpark backend server binary.
//!
//! Loads configuration, wires adapters into the HTTP routers, and
//! serves the API.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use datespark::adapters::http::{billing_router, content_router, BillingAppState, ContentAppState};
use datespark::adapters::{
    GeminiCompletionService, GeminiConfig, PostgresDocumentStore, RazorpayClient,
    RazorpayClientConfig,
};
use datespark::config::AppConfig;
use datespark::domain::billing::RazorpayWebhookVerifier;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(&config.server.log_level))
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        test_mode = config.payment.is_test_mode(),
        "Starting DateSpark backend"
    );

    // Document store
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .min_connections(config.database.min_connections)
        .connect(&config.database.url)
        .await?;
    let store = PostgresDocumentStore::new(pool);
    store.ensure_schema().await?;
    let store = Arc::new(store);

    // Payment gateway
    let gateway = Arc::new(RazorpayClient::new(RazorpayClientConfig::new(
        config.payment.razorpay_key_id.clone(),
        config.payment.razorpay_key_secret.clone(),
    )));

    // Webhook verifier; config validation guarantees the secret, but the
    // handler still fails closed if it is ever absent
    let webhook_verifier = if config.payment.razorpay_webhook_secret.is_empty() {
        None
    } else {
        Some(RazorpayWebhookVerifier::new(
            config.payment.razorpay_webhook_secret.clone(),
        ))
    };

    // Completion provider
    let gemini_key = config.ai.gemini_api_key.clone().unwrap_or_default();
    let mut gemini_config = GeminiConfig::new(gemini_key).with_timeout(config.ai.timeout());
    gemini_config.text_model = config.ai.text_model.clone();
    gemini_config.vision_model = config.ai.vision_model.clone();
    let completion = Arc::new(GeminiCompletionService::new(gemini_config));

    let billing_state = BillingAppState {
        document_store: store,
        payment_gateway: gateway,
        webhook_verifier,
    };
    let content_state = ContentAppState { completion };

    let api = Router::new()
        .merge(billing_router().with_state(billing_state))
        .merge(content_router().with_state(content_state));

    let app = Router::new()
        .route("/healthz", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(cors_layer(&config));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Listening");

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(config: &AppConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .server
        .cors_origins_list()
        .iter()
        .filter_map(|o| o.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
