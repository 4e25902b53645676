//! Requirement extraction: turns a free-text project description into a
//! structured capability set via an external language-model call.

mod client;
mod extract;
mod gemini;
mod prompt;

pub use client::{CompletionClient, CompletionError, MockClient};
pub use extract::{extract, Extraction};
pub use gemini::{GeminiClient, DEFAULT_MODEL};
pub use prompt::capability_prompt;
