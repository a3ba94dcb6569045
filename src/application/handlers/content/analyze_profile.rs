//! AnalyzeProfileHandler - Command handler for profile screenshot review.

use std::sync::Arc;

use crate::domain::content::ProfileImage;
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CompletionService;

use super::completion_error;

const ANALYSIS_PROMPT: &str =
    "You are DateSpark, an AI assistant reviewing a user's dating profile screenshot \
     (photos, bio, prompts). Provide constructive feedback focusing on authenticity, \
     clarity, photo quality (lighting, composition, background), and overall appeal. \
     Give a numeric score out of 10 for overall profile effectiveness. Structure the \
     feedback clearly with sections for Photos, Bio/Prompts, and Overall Score/Summary. \
     Be encouraging but honest.";

/// Command to analyze a profile screenshot.
#[derive(Debug, Clone)]
pub struct AnalyzeProfileCommand {
    /// Base64 data URL of the screenshot.
    pub image_base64: String,
}

/// Result of profile analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeProfileResult {
    pub analysis: String,
}

/// Handler for profile analysis.
pub struct AnalyzeProfileHandler {
    completion: Arc<dyn CompletionService>,
}

impl AnalyzeProfileHandler {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn handle(
        &self,
        cmd: AnalyzeProfileCommand,
    ) -> Result<AnalyzeProfileResult, DomainError> {
        let image = ProfileImage::from_data_url(&cmd.image_base64)?;

        let analysis = self
            .completion
            .complete_vision(ANALYSIS_PROMPT, &image)
            .await
            .map_err(completion_error)?;

        let analysis = analysis.trim().to_string();
        if analysis.is_empty() {
            return Err(DomainError::new(
                ErrorCode::CompletionProviderError,
                "Provider returned an empty analysis",
            ));
        }

        Ok(AnalyzeProfileResult { analysis })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockCompletionService;

    const IMAGE: &str = "data:image/png;base64,iVBORw0KGgo=";

    #[tokio::test]
    async fn analyzes_valid_image() {
        let completion = Arc::new(MockCompletionService::with_response(
            "Photos: good lighting. Score: 8/10",
        ));
        let handler = AnalyzeProfileHandler::new(completion);

        let result = handler
            .handle(AnalyzeProfileCommand {
                image_base64: IMAGE.to_string(),
            })
            .await
            .unwrap();

        assert!(result.analysis.contains("8/10"));
    }

    #[tokio::test]
    async fn rejects_invalid_data_url() {
        let handler =
            AnalyzeProfileHandler::new(Arc::new(MockCompletionService::with_response("x")));

        let result = handler
            .handle(AnalyzeProfileCommand {
                image_base64: "nonsense".to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn blocked_content_maps_to_content_blocked() {
        let handler =
            AnalyzeProfileHandler::new(Arc::new(MockCompletionService::blocking("SAFETY")));

        let result = handler
            .handle(AnalyzeProfileCommand {
                image_base64: IMAGE.to_string(),
            })
            .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::ContentBlocked);
    }
}
