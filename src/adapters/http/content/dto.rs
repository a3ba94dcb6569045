//! HTTP DTOs for content generation endpoints.

use serde::{Deserialize, Serialize};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Request to generate a profile bio.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateBioRequest {
    /// Free-form details about the user.
    pub user_input: String,
}

/// Request to punch up a dating-app prompt answer.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PunchUpPromptRequest {
    pub prompt: String,
    #[serde(default)]
    pub tone: Option<String>,
    #[serde(default)]
    pub cultural_context: Option<String>,
}

/// Request carrying a profile screenshot as a base64 data URL.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRequest {
    pub image_base64: String,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Response with a generated bio.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateBioResponse {
    pub bio: String,
}

/// Response with generated prompt answers.
#[derive(Debug, Clone, Serialize)]
pub struct PunchUpPromptResponse {
    pub responses: Vec<String>,
}

/// Response with a profile analysis.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyzeProfileResponse {
    pub analysis: String,
}

/// Response with conversation starters.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationStartersResponse {
    pub starters: Vec<String>,
}
