//! Gemini completion service adapter.
//!
//! Implements the `CompletionService` port against Google's Generative
//! Language API. Text prompts go to the text model, image-bearing
//! prompts to the vision model.
//!
//! # Configuration
//!
//! ```ignore
//! let config = GeminiConfig::new(api_key);
//! let service = GeminiCompletionService::new(config);
//! ```

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::content::ProfileImage;
use crate::ports::{CompletionError, CompletionService};

/// Configuration for the Gemini provider.
#[derive(Clone)]
pub struct GeminiConfig {
    /// API key for the Generative Language API.
    api_key: SecretString,
    /// Model for text-only prompts.
    pub text_model: String,
    /// Model for prompts with an inline image.
    pub vision_model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl GeminiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            text_model: "gemini-pro".to_string(),
            vision_model: "gemini-pro-vision".to_string(),
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the base URL (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Gemini implementation of the CompletionService port.
pub struct GeminiCompletionService {
    config: GeminiConfig,
    client: reqwest::Client,
}

impl GeminiCompletionService {
    /// Creates a new service with the given configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn generate_url(&self, model: &str) -> String {
        // The key travels as a query parameter per the API contract; it
        // must never appear in logs
        format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url,
            model,
            self.config.api_key.expose_secret()
        )
    }

    async fn generate(
        &self,
        model: &str,
        parts: Vec<RequestPart>,
    ) -> Result<String, CompletionError> {
        let body = GenerateRequest {
            contents: vec![RequestContent { parts }],
        };

        let response = self
            .client
            .post(self.generate_url(model))
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CompletionError::network("Request timed out")
                } else {
                    CompletionError::network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(CompletionError::provider(status.as_u16(), message));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::network(e.to_string()))?;

        if let Some(feedback) = body.prompt_feedback {
            if let Some(reason) = feedback.block_reason {
                return Err(CompletionError::ContentBlocked(reason));
            }
        }

        let text: String = body
            .candidates
            .into_iter()
            .next()
            .map(|c| {
                c.content
                    .parts
                    .into_iter()
                    .filter_map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(CompletionError::EmptyResponse);
        }
        Ok(text)
    }
}

#[async_trait]
impl CompletionService for GeminiCompletionService {
    async fn complete_text(&self, prompt: &str) -> Result<String, CompletionError> {
        self.generate(&self.config.text_model, vec![RequestPart::text(prompt)])
            .await
    }

    async fn complete_vision(
        &self,
        prompt: &str,
        image: &ProfileImage,
    ) -> Result<String, CompletionError> {
        self.generate(
            &self.config.vision_model,
            vec![RequestPart::text(prompt), RequestPart::inline_image(image)],
        )
        .await
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Wire Types
// ════════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inline_data", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl RequestPart {
    fn text(text: &str) -> Self {
        Self {
            text: Some(text.to_string()),
            inline_data: None,
        }
    }

    fn inline_image(image: &ProfileImage) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: image.mime_type().to_string(),
                data: image.base64_data().to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mime_type")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: ResponseContent,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_part_serializes_without_inline_data() {
        let part = RequestPart::text("hello");
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["text"], "hello");
        assert!(json.get("inline_data").is_none());
    }

    #[test]
    fn image_part_serializes_mime_and_data() {
        let image = ProfileImage::from_data_url("data:image/png;base64,abcd").unwrap();
        let part = RequestPart::inline_image(&image);
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inline_data"]["mime_type"], "image/png");
        assert_eq!(json["inline_data"]["data"], "abcd");
    }

    #[test]
    fn response_parses_candidate_text() {
        let json = r#"{
            "candidates": [
                {"content": {"parts": [{"text": "Generated "}, {"text": "bio"}], "role": "model"}}
            ]
        }"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        let text: String = response.candidates[0]
            .content
            .parts
            .iter()
            .filter_map(|p| p.text.clone())
            .collect();
        assert_eq!(text, "Generated bio");
    }

    #[test]
    fn response_parses_block_reason() {
        let json = r#"{"candidates": [], "promptFeedback": {"blockReason": "SAFETY"}}"#;
        let response: GenerateResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.prompt_feedback.unwrap().block_reason.as_deref(),
            Some("SAFETY")
        );
    }
}
