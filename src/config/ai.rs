//! Completion provider configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Completion provider configuration (Gemini)
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub gemini_api_key: Option<String>,

    /// Model for text-only prompts
    #[serde(default = "default_text_model")]
    pub text_model: String,

    /// Model for prompts with an inline image
    #[serde(default = "default_vision_model")]
    pub vision_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if a provider key is configured
    pub fn has_provider(&self) -> bool {
        self.gemini_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Validate AI configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_provider() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            gemini_api_key: None,
            text_model: default_text_model(),
            vision_model: default_vision_model(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_text_model() -> String {
    "gemini-pro".to_string()
}

fn default_vision_model() -> String {
    "gemini-pro-vision".to_string()
}

fn default_timeout() -> u64 {
    60
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.text_model, "gemini-pro");
        assert_eq!(config.vision_model, "gemini-pro-vision");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 30,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validation_requires_api_key() {
        let config = AiConfig::default();
        assert!(config.validate().is_err());

        let config = AiConfig {
            gemini_api_key: Some("".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AiConfig {
            gemini_api_key: Some("key".to_string()),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }
}
