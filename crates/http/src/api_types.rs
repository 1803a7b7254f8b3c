//! Wire types for the HTTP API.
//!
//! The API speaks camelCase (`childId`, `storyHtml`, `pdfUrl`) to match the
//! web frontend; domain types stay snake_case internally.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use storynest_core::constants::{DEFAULT_INTERVAL, DEFAULT_THEME};
use storynest_core::StoryArtifact;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateParams {
    pub child_id: Option<i64>,
    pub interval: String,
    pub theme: String,
    pub pdf: bool,
}

impl Default for GenerateParams {
    fn default() -> Self {
        Self {
            child_id: None,
            interval: DEFAULT_INTERVAL.to_owned(),
            theme: DEFAULT_THEME.to_owned(),
            pdf: false,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateResponse {
    pub story_html: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pdf_url: Option<String>,
    pub generated_at: DateTime<Utc>,
}

impl From<StoryArtifact> for GenerateResponse {
    fn from(artifact: StoryArtifact) -> Self {
        Self {
            story_html: artifact.story_html,
            pdf_url: artifact.pdf_url,
            generated_at: artifact.generated_at,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MemoryListParams {
    pub child_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMemoryRequest {
    pub child_id: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub taken_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateChildRequest {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct ReadinessResponse {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}
