//! Validated user inputs for content generation.

use crate::domain::foundation::ValidationError;

/// Maximum length of the free-form details a user supplies for bio
/// generation.
const MAX_BIO_DETAILS_LEN: usize = 500;

/// Maximum length of a dating-app prompt to punch up.
const MAX_PROMPT_LEN: usize = 200;

/// Maximum accepted data URL length. Base64 inflates raw bytes by ~4/3,
/// so this admits roughly a 10 MB image.
const MAX_DATA_URL_LEN: usize = 14 * 1024 * 1024;

/// Free-form personal details used to generate a bio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BioDetails(String);

impl BioDetails {
    /// Validates and wraps user-supplied bio details.
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("userInput"));
        }
        if input.chars().count() > MAX_BIO_DETAILS_LEN {
            return Err(ValidationError::too_long(
                "userInput",
                MAX_BIO_DETAILS_LEN,
                input.chars().count(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A dating-app prompt answer the user wants improved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText(String);

impl PromptText {
    /// Validates and wraps a user-supplied prompt.
    pub fn new(input: impl Into<String>) -> Result<Self, ValidationError> {
        let input = input.into();
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("prompt"));
        }
        if input.chars().count() > MAX_PROMPT_LEN {
            return Err(ValidationError::too_long(
                "prompt",
                MAX_PROMPT_LEN,
                input.chars().count(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// An uploaded profile screenshot, decoded from a base64 data URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileImage {
    mime_type: String,
    data: String,
}

impl ProfileImage {
    /// Parses a `data:image/<subtype>;base64,<payload>` URL.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidFormat` for anything that is not
    /// a base64 image data URL, and `ValidationError::TooLong` past the
    /// size bound.
    pub fn from_data_url(url: &str) -> Result<Self, ValidationError> {
        if url.len() > MAX_DATA_URL_LEN {
            return Err(ValidationError::too_long(
                "imageBase64",
                MAX_DATA_URL_LEN,
                url.len(),
            ));
        }

        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| invalid_image("missing data: prefix"))?;
        let (mime_type, rest) = rest
            .split_once(";base64,")
            .ok_or_else(|| invalid_image("missing ;base64, marker"))?;

        if !mime_type.starts_with("image/") || mime_type.len() <= "image/".len() {
            return Err(invalid_image("not an image media type"));
        }
        if rest.is_empty() {
            return Err(invalid_image("empty payload"));
        }

        Ok(Self {
            mime_type: mime_type.to_string(),
            data: rest.to_string(),
        })
    }

    /// The image media type (e.g., "image/png").
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    /// The base64 payload, without the data URL prefix.
    pub fn base64_data(&self) -> &str {
        &self.data
    }
}

fn invalid_image(reason: &str) -> ValidationError {
    ValidationError::invalid_format("imageBase64", reason)
}
