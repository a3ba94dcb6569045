//! Completion service adapters.

mod gemini;
mod mock;

pub use gemini::{GeminiCompletionService, GeminiConfig};
pub use mock::MockCompletionService;
