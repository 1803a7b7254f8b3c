//! The generation pipeline: Received → QuotaReserved → PromptBuilt →
//! ContentGenerated → Rendered → [PdfDelegated] → Responded.

use std::sync::Arc;

use chrono::Utc;

use storynest_core::constants::FALLBACK_CHILD_NAME;
use storynest_core::{BillingPeriod, GenerationRequest, JournalStore, StoryArtifact};
use storynest_llm::{build_prompt, ContentGenerator};
use storynest_pdf::{pdf_filename, PdfClient};
use storynest_themes::ThemeRegistry;

use crate::GenerationError;

/// Orchestrates one storybook generation per call.
///
/// All collaborators are injected at construction; the service holds no
/// global state and no caches. Stateless per request: concurrent requests
/// only meet at the storage layer, where the quota reservation is atomic.
pub struct GenerationService {
    store: Arc<dyn JournalStore>,
    generator: ContentGenerator,
    themes: ThemeRegistry,
    pdf: Option<PdfClient>,
    quota: u32,
}

impl GenerationService {
    #[must_use]
    pub fn new(
        store: Arc<dyn JournalStore>,
        generator: ContentGenerator,
        themes: ThemeRegistry,
        pdf: Option<PdfClient>,
        quota: u32,
    ) -> Self {
        Self { store, generator, themes, pdf, quota }
    }

    /// The configured monthly free allowance.
    #[must_use]
    pub const fn quota(&self) -> u32 {
        self.quota
    }

    /// Whether a PDF delegate endpoint is configured.
    #[must_use]
    pub const fn pdf_configured(&self) -> bool {
        self.pdf.is_some()
    }

    /// Run the full pipeline for one request.
    ///
    /// Quota is reserved atomically up front. A failure before an artifact
    /// exists (storage read, model call, theme render) releases the
    /// reservation so failed generations do not consume quota. A PDF
    /// delegate failure does *not* release: the generation is committed by
    /// then, and the caller simply gets no downloadable artifact.
    ///
    /// # Errors
    /// Returns [`GenerationError`] naming the stage that failed.
    pub async fn generate(
        &self,
        user_id: &str,
        request: &GenerationRequest,
    ) -> Result<StoryArtifact, GenerationError> {
        let period = BillingPeriod::current();
        let decision = self
            .store
            .reserve_call(user_id, period.start(), self.quota)
            .await
            .map_err(GenerationError::UsageRead)?;
        if !decision.allowed {
            tracing::info!(user_id, calls = decision.calls, quota = self.quota, "quota exceeded");
            return Err(GenerationError::QuotaExceeded { quota: self.quota });
        }
        tracing::debug!(user_id, calls = decision.calls, "reserved generation call");

        let (child_name, story_html) = match self.build_story(request).await {
            Ok(story) => story,
            Err(e) => {
                self.release(user_id, period).await;
                return Err(e);
            },
        };

        let generated_at = Utc::now();
        let pdf_url = match (&self.pdf, request.pdf) {
            (Some(client), true) => {
                let filename = pdf_filename(&child_name, generated_at);
                Some(client.render_and_upload(&story_html, &filename).await?)
            },
            // capability toggle, not a fallback: no delegate or no request
            // means the delegate is skipped entirely
            _ => None,
        };

        Ok(StoryArtifact { story_html, pdf_url, generated_at })
    }

    /// Stages between reservation and the committed artifact.
    async fn build_story(
        &self,
        request: &GenerationRequest,
    ) -> Result<(String, String), GenerationError> {
        let child = self
            .store
            .get_child(request.child_id)
            .await
            .map_err(GenerationError::Storage)?;
        let child_name = child.map_or_else(|| FALLBACK_CHILD_NAME.to_owned(), |c| c.name);

        let memories = self
            .store
            .list_memories(request.child_id)
            .await
            .map_err(GenerationError::Storage)?;

        let prompt = build_prompt(&child_name, &request.interval, &memories);
        let content = self.generator.generate(&child_name, &prompt).await?;
        let story_html = self.themes.render(&request.theme, &child_name, &request.interval, &content)?;
        Ok((child_name, story_html))
    }

    /// Best-effort accounting undo; failures are logged, never surfaced.
    async fn release(&self, user_id: &str, period: BillingPeriod) {
        if let Err(e) = self.store.release_call(user_id, period.start()).await {
            tracing::warn!(user_id, error = %e, "failed to release quota reservation");
        }
    }
}
