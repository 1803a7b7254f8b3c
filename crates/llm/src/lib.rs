//! LLM integration for storybook content generation.
//!
//! `LlmClient` speaks the chat-completion wire protocol; `ContentGenerator`
//! wraps it with the deterministic sample mode used when no provider
//! credential is configured; `build_prompt` turns a child's memories into
//! the model prompt.

mod ai_types;
mod client;
mod error;
mod generator;
mod prompt;

pub use client::{truncate, LlmClient, DEFAULT_MODEL, MAX_OUTPUT_TOKENS};
pub use error::LlmError;
pub use generator::{sample_content, ContentGenerator};
pub use prompt::build_prompt;
