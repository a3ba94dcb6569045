//! Axum router configuration for content generation endpoints.

use axum::{routing::post, Router};

use super::handlers::{
    analyze_profile, conversation_starters, generate_bio, punch_up_prompt, ContentAppState,
};

/// Create the content API router.
///
/// # Routes (all require authentication)
/// - `POST /bio` - Generate a profile bio
/// - `POST /prompt` - Punch up a prompt answer
/// - `POST /profile-analysis` - Review a profile screenshot
/// - `POST /conversation-starters` - Generate openers from a screenshot
pub fn content_routes() -> Router<ContentAppState> {
    Router::new()
        .route("/bio", post(generate_bio))
        .route("/prompt", post(punch_up_prompt))
        .route("/profile-analysis", post(analyze_profile))
        .route("/conversation-starters", post(conversation_starters))
}

/// Create the content module router, suitable for mounting at the API
/// root.
pub fn content_router() -> Router<ContentAppState> {
    Router::new().nest("/content", content_routes())
}
