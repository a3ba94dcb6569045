//! HTTP handlers for content generation endpoints.

use std::sync::Arc;

use axum::extract::{Json, State};
use axum::response::IntoResponse;

use crate::application::handlers::content::{
    AnalyzeProfileCommand, AnalyzeProfileHandler, ConversationStartersCommand,
    ConversationStartersHandler, GenerateBioCommand, GenerateBioHandler, PunchUpPromptCommand,
    PunchUpPromptHandler,
};
use crate::ports::CompletionService;

use super::super::billing::AuthenticatedUser;
use super::super::ApiError;
use super::dto::{
    AnalyzeProfileResponse, ConversationStartersResponse, GenerateBioRequest, GenerateBioResponse,
    ImageRequest, PunchUpPromptRequest, PunchUpPromptResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared state for content routes.
#[derive(Clone)]
pub struct ContentAppState {
    pub completion: Arc<dyn CompletionService>,
}

impl ContentAppState {
    pub fn generate_bio_handler(&self) -> GenerateBioHandler {
        GenerateBioHandler::new(self.completion.clone())
    }

    pub fn punch_up_prompt_handler(&self) -> PunchUpPromptHandler {
        PunchUpPromptHandler::new(self.completion.clone())
    }

    pub fn analyze_profile_handler(&self) -> AnalyzeProfileHandler {
        AnalyzeProfileHandler::new(self.completion.clone())
    }

    pub fn conversation_starters_handler(&self) -> ConversationStartersHandler {
        ConversationStartersHandler::new(self.completion.clone())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/content/bio - Generate a profile bio
pub async fn generate_bio(
    State(state): State<ContentAppState>,
    _user: AuthenticatedUser,
    Json(request): Json<GenerateBioRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let handler = state.generate_bio_handler();
    let result = handler
        .handle(GenerateBioCommand {
            details: request.user_input,
        })
        .await?;

    Ok(Json(GenerateBioResponse { bio: result.bio }))
}

/// POST /api/content/prompt - Punch up a prompt answer
pub async fn punch_up_prompt(
    State(state): State<ContentAppState>,
    _user: AuthenticatedUser,
    Json(request): Json<PunchUpPromptRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.punch_up_prompt_handler();
    let result = handler
        .handle(PunchUpPromptCommand {
            prompt: request.prompt,
            tone: request.tone,
            cultural_context: request.cultural_context,
        })
        .await?;

    Ok(Json(PunchUpPromptResponse {
        responses: result.responses,
    }))
}

/// POST /api/content/profile-analysis - Review a profile screenshot
pub async fn analyze_profile(
    State(state): State<ContentAppState>,
    _user: AuthenticatedUser,
    Json(request): Json<ImageRequest>,
) -> Result<impl IntoResponse + std::fmt::Debug, ApiError> {
    let handler = state.analyze_profile_handler();
    let result = handler
        .handle(AnalyzeProfileCommand {
            image_base64: request.image_base64,
        })
        .await?;

    Ok(Json(AnalyzeProfileResponse {
        analysis: result.analysis,
    }))
}

/// POST /api/content/conversation-starters - Generate openers from a
/// profile screenshot
pub async fn conversation_starters(
    State(state): State<ContentAppState>,
    _user: AuthenticatedUser,
    Json(request): Json<ImageRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let handler = state.conversation_starters_handler();
    let result = handler
        .handle(ConversationStartersCommand {
            image_base64: request.image_base64,
        })
        .await?;

    Ok(Json(ConversationStartersResponse {
        starters: result.starters,
    }))
}
