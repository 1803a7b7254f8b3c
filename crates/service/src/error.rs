//! Stage-tagged error enum for the generation pipeline.
//!
//! Each variant names the pipeline stage that failed, so the HTTP layer can
//! map failures to the wire error codes (`usage_read_failed`, `ai_failed`,
//! `worker_failed`) without downcasting.

use storynest_llm::LlmError;
use storynest_pdf::RenderError;
use storynest_themes::ThemeError;
use thiserror::Error;

/// A generation request's terminal failure state.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The user's free allowance for the billing period is spent.
    #[error("Monthly quota of {quota} reached")]
    QuotaExceeded { quota: u32 },

    /// The usage ledger could not be read or updated. Fails closed: an
    /// unreadable ledger must not silently grant quota.
    #[error("usage ledger unavailable: {0}")]
    UsageRead(#[source] anyhow::Error),

    /// Child or memory rows could not be read.
    #[error("storage: {0}")]
    Storage(#[source] anyhow::Error),

    /// The model call failed. The request aborts before any content exists.
    #[error("content generation failed: {0}")]
    Provider(#[from] LlmError),

    /// Theme rendering failed.
    #[error("theme rendering failed: {0}")]
    Theme(#[from] ThemeError),

    /// The PDF delegate failed *after* the generation itself succeeded; the
    /// HTML and usage increment are already committed.
    #[error("pdf delegate failed: {0}")]
    PdfDelegate(#[from] RenderError),
}
