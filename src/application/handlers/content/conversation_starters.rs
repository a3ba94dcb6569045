//! ConversationStartersHandler - Command handler for openers based on
//! someone else's profile screenshot.

use std::sync::Arc;

use crate::domain::content::{split_numbered, ProfileImage};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CompletionService;

use super::completion_error;

const STARTERS_PROMPT: &str =
    "You are DateSpark, an AI assistant helping users craft conversation starters based \
     on someone else's dating profile screenshot. Analyze the visible photos, bio, and \
     prompts. Generate 3 distinct conversation starters that are specific, engaging, \
     and reference details from the profile. Offer a mix of playful, sincere, and \
     specific options. Number each starter clearly starting from 1.";

/// Command to generate conversation starters from a profile screenshot.
#[derive(Debug, Clone)]
pub struct ConversationStartersCommand {
    /// Base64 data URL of the screenshot.
    pub image_base64: String,
}

/// Result of starter generation.
#[derive(Debug, Clone)]
pub struct ConversationStartersResult {
    pub starters: Vec<String>,
}

/// Handler for conversation starter generation.
pub struct ConversationStartersHandler {
    completion: Arc<dyn CompletionService>,
}

impl ConversationStartersHandler {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn handle(
        &self,
        cmd: ConversationStartersCommand,
    ) -> Result<ConversationStartersResult, DomainError> {
        let image = ProfileImage::from_data_url(&cmd.image_base64)?;

        let raw = self
            .completion
            .complete_vision(STARTERS_PROMPT, &image)
            .await
            .map_err(completion_error)?;

        let starters = split_numbered(&raw);
        if starters.is_empty() {
            return Err(DomainError::new(
                ErrorCode::CompletionProviderError,
                "Provider returned no starters",
            ));
        }

        Ok(ConversationStartersResult { starters })
    }
}
