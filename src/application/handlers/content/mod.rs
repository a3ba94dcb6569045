//! Content generation handlers.
//!
//! Each handler validates input shape in the domain layer, forwards a
//! prompt (and optionally an image) to the completion service, and
//! reshapes the text response.

mod analyze_profile;
mod conversation_starters;
mod generate_bio;
mod punch_up_prompt;

pub use analyze_profile::{AnalyzeProfileCommand, AnalyzeProfileHandler, AnalyzeProfileResult};
pub use conversation_starters::{
    ConversationStartersCommand, ConversationStartersHandler, ConversationStartersResult,
};
pub use generate_bio::{GenerateBioCommand, GenerateBioHandler, GenerateBioResult};
pub use punch_up_prompt::{PunchUpPromptCommand, PunchUpPromptHandler, PunchUpPromptResult};

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::ports::CompletionError;

/// Maps provider failures onto domain error codes.
fn completion_error(err: CompletionError) -> DomainError {
    match err {
        CompletionError::ContentBlocked(reason) => {
            DomainError::new(ErrorCode::ContentBlocked, reason)
        }
        other => {
            tracing::error!(error = %other, "Completion provider call failed");
            DomainError::new(ErrorCode::CompletionProviderError, other.to_string())
        }
    }
}
