//! CompletionService port - Opaque text/vision completion provider.
//!
//! The provider is invoked with a prompt (optionally with an inline
//! image) and returns generated text. Prompt construction and response
//! shaping live in the domain/application layers; this port only moves
//! strings.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::content::ProfileImage;

/// Errors surfaced by completion provider implementations.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("Completion request failed: {0}")]
    Network(String),

    #[error("Provider returned {status}: {message}")]
    Provider { status: u16, message: String },

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Content blocked by provider safety settings: {0}")]
    ContentBlocked(String),
}

impl CompletionError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        CompletionError::Network(message.into())
    }

    /// Creates a provider error from an HTTP status and message.
    pub fn provider(status: u16, message: impl Into<String>) -> Self {
        CompletionError::Provider {
            status,
            message: message.into(),
        }
    }
}

/// Port for the generative completion provider.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Generates text from a prompt.
    async fn complete_text(&self, prompt: &str) -> Result<String, CompletionError>;

    /// Generates text from a prompt plus an inline image.
    async fn complete_vision(
        &self,
        prompt: &str,
        image: &ProfileImage,
    ) -> Result<String, CompletionError>;
}
