//! Transient types flowing through the generation pipeline.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_INTERVAL, DEFAULT_THEME};

/// A single storybook generation request. Not persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    pub child_id: i64,
    pub interval: String,
    pub theme: String,
    pub pdf: bool,
}

impl GenerationRequest {
    /// Request with default interval/theme and no PDF.
    #[must_use]
    pub fn new(child_id: i64) -> Self {
        Self {
            child_id,
            interval: DEFAULT_INTERVAL.to_owned(),
            theme: DEFAULT_THEME.to_owned(),
            pdf: false,
        }
    }

    #[must_use]
    pub fn with_theme(mut self, theme: &str) -> Self {
        self.theme = theme.to_owned();
        self
    }

    #[must_use]
    pub fn with_pdf(mut self, pdf: bool) -> Self {
        self.pdf = pdf;
        self
    }
}

/// The produced storybook: rendered HTML and, when the PDF delegate ran,
/// a durable (possibly signed, time-limited) URL to the uploaded PDF.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryArtifact {
    pub story_html: String,
    pub pdf_url: Option<String>,
    pub generated_at: DateTime<Utc>,
}
