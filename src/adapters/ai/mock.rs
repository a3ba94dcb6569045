//! Mock completion service for tests and local development.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::domain::content::ProfileImage;
use crate::ports::{CompletionError, CompletionService};

enum Behavior {
    Respond(String),
    Fail,
    Block(String),
}

/// Completion service returning canned responses and recording prompts.
pub struct MockCompletionService {
    behavior: Behavior,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletionService {
    /// Responds to every call with the given text.
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Respond(response.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Fails every call with a network error.
    pub fn failing() -> Self {
        Self {
            behavior: Behavior::Fail,
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Blocks every call with the given safety reason.
    pub fn blocking(reason: impl Into<String>) -> Self {
        Self {
            behavior: Behavior::Block(reason.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Returns the prompts received so far.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    fn respond(&self, prompt: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.behavior {
            Behavior::Respond(text) => Ok(text.clone()),
            Behavior::Fail => Err(CompletionError::network("mock failure")),
            Behavior::Block(reason) => Err(CompletionError::ContentBlocked(reason.clone())),
        }
    }
}

#[async_trait]
impl CompletionService for MockCompletionService {
    async fn complete_text(&self, prompt: &str) -> Result<String, CompletionError> {
        self.respond(prompt)
    }

    async fn complete_vision(
        &self,
        prompt: &str,
        _image: &ProfileImage,
    ) -> Result<String, CompletionError> {
        self.respond(prompt)
    }
}
