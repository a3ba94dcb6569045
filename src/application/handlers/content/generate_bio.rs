//! GenerateBioHandler - Command handler for dating-profile bio generation.

use std::sync::Arc;

use crate::domain::content::BioDetails;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CompletionService;

use super::completion_error;

/// Command to generate a bio from user-supplied details.
#[derive(Debug, Clone)]
pub struct GenerateBioCommand {
    pub details: String,
}

/// Result of bio generation.
#[derive(Debug, Clone)]
pub struct GenerateBioResult {
    pub bio: String,
}

/// Handler for bio generation.
pub struct GenerateBioHandler {
    completion: Arc<dyn CompletionService>,
}

impl GenerateBioHandler {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn handle(&self, cmd: GenerateBioCommand) -> Result<GenerateBioResult, DomainError> {
        let details = BioDetails::new(cmd.details)?;

        let prompt = format!(
            "You are DateSpark, an AI assistant helping users write unique and engaging \
             dating profile bios. Avoid clichés. Be witty, concise, and highlight the \
             user's personality based on their input. Generate one bio option based on \
             these user details: \"{}\"",
            details.as_str()
        );

        let bio = self
            .completion
            .complete_text(&prompt)
            .await
            .map_err(completion_error)?;

        let bio = bio.trim().to_string();
        if bio.is_empty() {
            return Err(DomainError::new(
                ErrorCode::CompletionProviderError,
                "Provider returned an empty bio",
            ));
        }

        Ok(GenerateBioResult { bio })
    }
}
