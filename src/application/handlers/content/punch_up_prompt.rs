//! PunchUpPromptHandler - Command handler for improving prompt answers.

use std::sync::Arc;

use crate::domain::content::{split_numbered, PromptText};
use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CompletionService;

use super::completion_error;

const DEFAULT_TONE: &str = "witty";
const DEFAULT_CULTURAL_CONTEXT: &str = "general";

/// Command to generate response options for a dating-app prompt.
#[derive(Debug, Clone)]
pub struct PunchUpPromptCommand {
    pub prompt: String,
    pub tone: Option<String>,
    pub cultural_context: Option<String>,
}

/// Result of prompt punch-up.
#[derive(Debug, Clone)]
pub struct PunchUpPromptResult {
    pub responses: Vec<String>,
}

/// Handler for prompt punch-up.
pub struct PunchUpPromptHandler {
    completion: Arc<dyn CompletionService>,
}

impl PunchUpPromptHandler {
    pub fn new(completion: Arc<dyn CompletionService>) -> Self {
        Self { completion }
    }

    pub async fn handle(
        &self,
        cmd: PunchUpPromptCommand,
    ) -> Result<PunchUpPromptResult, DomainError> {
        let prompt_text = PromptText::new(cmd.prompt)?;
        let tone = cmd.tone.unwrap_or_else(|| DEFAULT_TONE.to_string());
        let cultural_context = cmd
            .cultural_context
            .unwrap_or_else(|| DEFAULT_CULTURAL_CONTEXT.to_string());

        let prompt = format!(
            "You are DateSpark, an AI assistant helping users write responses for dating \
             app prompts. Generate 3 distinct response options based on the user's \
             prompt: \"{}\". Desired tone: {}. Cultural Context: {}. Keep responses \
             concise and engaging. Number each response clearly starting from 1.",
            prompt_text.as_str(),
            tone,
            cultural_context
        );

        let raw = self
            .completion
            .complete_text(&prompt)
            .await
            .map_err(completion_error)?;

        let responses = split_numbered(&raw);
        if responses.is_empty() {
            return Err(DomainError::new(
                ErrorCode::CompletionProviderError,
                "Provider returned no responses",
            ));
        }

        Ok(PunchUpPromptResult { responses })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MockCompletionService;

    #[tokio::test]
    async fn splits_numbered_responses() {
        let completion = Arc::new(MockCompletionService::with_response(
            "1. Option one\n2. Option two\n3. Option three",
        ));
        let handler = PunchUpPromptHandler::new(completion);

        let result = handler
            .handle(PunchUpPromptCommand {
                prompt: "Two truths and a lie".to_string(),
                tone: None,
                cultural_context: None,
            })
            .await
            .unwrap();

        assert_eq!(
            result.responses,
            vec!["Option one", "Option two", "Option three"]
        );
    }

    #[tokio::test]
    async fn falls_back_to_whole_text_when_unnumbered() {
        let completion =
            Arc::new(MockCompletionService::with_response("One witty answer only"));
        let handler = PunchUpPromptHandler::new(completion);

        let result = handler
            .handle(PunchUpPromptCommand {
                prompt: "My simple pleasures".to_string(),
                tone: None,
                cultural_context: None,
            })
            .await
            .unwrap();

        assert_eq!(result.responses, vec!["One witty answer only"]);
    }

    #[tokio::test]
    async fn defaults_tone_and_context_in_prompt() {
        let completion = Arc::new(MockCompletionService::with_response("1. x"));
        let handler = PunchUpPromptHandler::new(completion.clone());

        handler
            .handle(PunchUpPromptCommand {
                prompt: "Ask me about".to_string(),
                tone: None,
                cultural_context: None,
            })
            .await
            .unwrap();

        let prompt = completion.prompts().remove(0);
        assert!(prompt.contains("Desired tone: witty"));
        assert!(prompt.contains("Cultural Context: general"));
    }

    #[tokio::test]
    async fn honors_explicit_tone_and_context() {
        let completion = Arc::new(MockCompletionService::with_response("1. x"));
        let handler = PunchUpPromptHandler::new(completion.clone());

        handler
            .handle(PunchUpPromptCommand {
                prompt: "Ask me about".to_string(),
                tone: Some("sincere".to_string()),
                cultural_context: Some("indian".to_string()),
            })
            .await
            .unwrap();

        let prompt = completion.prompts().remove(0);
        assert!(prompt.contains("Desired tone: sincere"));
        assert!(prompt.contains("Cultural Context: indian"));
    }

    #[tokio::test]
    async fn rejects_oversized_prompt() {
        let handler =
            PunchUpPromptHandler::new(Arc::new(MockCompletionService::with_response("x")));

        let result = handler
            .handle(PunchUpPromptCommand {
                prompt: "p".repeat(201),
                tone: None,
                cultural_context: None,
            })
            .await;

        assert_eq!(result.unwrap_err().code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn empty_completion_is_an_error() {
        let handler =
            PunchUpPromptHandler::new(Arc::new(MockCompletionService::with_response("  ")));

        let result = handler
            .handle(PunchUpPromptCommand {
                prompt: "Ask me".to_string(),
                tone: None,
                cultural_context: None,
            })
            .await;

        assert_eq!(
            result.unwrap_err().code,
            ErrorCode::CompletionProviderError
        );
    }
}
