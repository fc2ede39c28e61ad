//! Generative AI companion.
//!
//! This module wraps the hosted generative language API behind the
//! [`TextGenerator`] trait and provides the prompts the journaling workflows
//! send through it.
//!
//! # Module Structure
//!
//! - `gemini`: HTTP client for the hosted API
//! - `prompts`: System instruction, prompt builders and fallback lines
//!
//! The companion never fails loudly: [`generate_or_fallback`] logs whatever
//! went wrong and hands back a fixed, human-readable line instead.
//!
//! # Example
//!
//! ```no_run
//! use echo_journal::ai::{generate_or_fallback, GeminiClient, GenerationRequest};
//! use std::time::Duration;
//!
//! let client = GeminiClient::new(
//!     "https://generativelanguage.googleapis.com",
//!     "gemini-2.0-flash",
//!     Some("api-key".to_string()),
//!     Duration::from_secs(20),
//! );
//! let reply = generate_or_fallback(&client, &GenerationRequest::new("Hello"), "I'm listening...");
//! println!("{}", reply);
//! ```

pub mod gemini;
pub mod prompts;

pub use gemini::GeminiClient;

use crate::errors::AppResult;
use tracing::warn;

/// One completion request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub system_instruction: Option<String>,
    /// Ask the service to answer with a JSON document.
    pub json_response: bool,
}

impl GenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            system_instruction: None,
            json_response: false,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    pub fn json(mut self) -> Self {
        self.json_response = true;
        self
    }
}

/// Anything that can turn a prompt into text.
pub trait TextGenerator {
    /// Produces a completion for `request`.
    fn generate(&self, request: &GenerationRequest) -> AppResult<String>;
}

/// Runs `request`, substituting `fallback` on any failure.
pub fn generate_or_fallback<G: TextGenerator + ?Sized>(
    generator: &G,
    request: &GenerationRequest,
    fallback: &str,
) -> String {
    match generator.generate(request) {
        Ok(text) => text.trim().to_string(),
        Err(e) => {
            warn!("AI request failed, using fallback text: {}", e);
            fallback.to_string()
        }
    }
}

/// Splits a `|`-separated suggestion list, keeping at most `limit` non-empty items.
pub fn split_suggestions(text: &str, limit: usize) -> Vec<String> {
    text.split('|')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .take(limit)
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::errors::{AIError, AppError};
    use std::cell::RefCell;

    /// Replies from a script and records every request it saw.
    pub struct ScriptedGenerator {
        replies: RefCell<Vec<AppResult<String>>>,
        pub requests: RefCell<Vec<GenerationRequest>>,
    }

    impl ScriptedGenerator {
        pub fn replying(replies: &[&str]) -> Self {
            Self {
                replies: RefCell::new(replies.iter().map(|r| Ok(r.to_string())).collect()),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                replies: RefCell::new(Vec::new()),
                requests: RefCell::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl TextGenerator for ScriptedGenerator {
        fn generate(&self, request: &GenerationRequest) -> AppResult<String> {
            self.requests.borrow_mut().push(request.clone());
            let mut replies = self.replies.borrow_mut();
            if replies.is_empty() {
                Err(AppError::AI(AIError::InvalidResponse(
                    "scripted failure".to_string(),
                )))
            } else {
                replies.remove(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::ScriptedGenerator;
    use super::*;

    #[test]
    fn test_generate_or_fallback_uses_reply() {
        let generator = ScriptedGenerator::replying(&["  a reply \n"]);
        let text = generate_or_fallback(&generator, &GenerationRequest::new("p"), "fallback");
        assert_eq!(text, "a reply");
    }

    #[test]
    fn test_generate_or_fallback_on_error() {
        let generator = ScriptedGenerator::failing();
        let text = generate_or_fallback(&generator, &GenerationRequest::new("p"), "fallback");
        assert_eq!(text, "fallback");
        assert_eq!(generator.call_count(), 1);
    }

    #[test]
    fn test_request_builder() {
        let request = GenerationRequest::new("prompt")
            .with_system_instruction("system")
            .json();
        assert_eq!(request.prompt, "prompt");
        assert_eq!(request.system_instruction.as_deref(), Some("system"));
        assert!(request.json_response);
    }

    #[test]
    fn test_split_suggestions() {
        assert_eq!(
            split_suggestions(" Drink water | Tidy a corner|| Watch the sunset | extra", 3),
            vec!["Drink water", "Tidy a corner", "Watch the sunset"]
        );
        assert!(split_suggestions("   ", 3).is_empty());
    }
}
