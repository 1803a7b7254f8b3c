//! Content generation with a deterministic degraded mode.

use std::time::Duration;

use crate::{LlmClient, LlmError};

/// Fixed placeholder produced when no provider credential is configured.
///
/// A deliberate degraded mode for environments without a live model
/// subscription, not an error.
#[must_use]
pub fn sample_content(child_name: &str) -> String {
    format!(
        "Sample content for {child_name}. Set STORYNEST_API_KEY in the environment \
         to enable real generation."
    )
}

/// Produces storybook text from a prompt.
///
/// `Sample` never touches the network; `Live` makes exactly one
/// chat-completion call and surfaces any failure as [`LlmError`].
#[derive(Debug)]
pub enum ContentGenerator {
    Live(LlmClient),
    Sample,
}

impl ContentGenerator {
    /// Build from an optional credential: present → live client, absent →
    /// sample mode (logged once at startup).
    ///
    /// # Errors
    /// Returns an error if the live HTTP client cannot be built.
    pub fn from_credentials(
        api_key: Option<String>,
        base_url: String,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        match api_key {
            Some(key) => Ok(Self::Live(LlmClient::new(key, base_url, timeout)?)),
            None => {
                tracing::warn!("no API key configured, generating sample content only");
                Ok(Self::Sample)
            },
        }
    }

    #[must_use]
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    /// Generate storybook content for the prompt.
    ///
    /// # Errors
    /// Returns [`LlmError`] when the live provider call fails; sample mode
    /// is infallible.
    pub async fn generate(&self, child_name: &str, prompt: &str) -> Result<String, LlmError> {
        match self {
            Self::Live(client) => client.chat_completion(prompt).await,
            Self::Sample => Ok(sample_content(child_name)),
        }
    }
}
