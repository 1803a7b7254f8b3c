use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::RenderError;

#[derive(Serialize)]
struct RenderRequest<'a> {
    html: &'a str,
    filename: &'a str,
}

#[derive(Deserialize)]
struct RenderResponse {
    #[serde(rename = "publicUrl")]
    public_url: String,
}

/// Collision-free PDF filename: child name with whitespace collapsed to
/// underscores, millisecond timestamp suffix.
#[must_use]
pub fn pdf_filename(child_name: &str, at: DateTime<Utc>) -> String {
    let stem: Vec<&str> = child_name.split_whitespace().collect();
    format!("{}-{}.pdf", stem.join("_"), at.timestamp_millis())
}

/// Client for the `/render-and-upload` delegate endpoint, authenticated by
/// shared secret.
pub struct PdfClient {
    client: reqwest::Client,
    base_url: String,
    secret: String,
}

impl std::fmt::Debug for PdfClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PdfClient")
            .field("base_url", &self.base_url)
            .field("secret", &"***")
            .finish()
    }
}

impl PdfClient {
    /// Creates a new delegate client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: String, secret: String, timeout: Duration) -> Result<Self, RenderError> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RenderError::ClientInit(e.to_string()))?;
        Ok(Self { client, base_url, secret })
    }

    /// Returns the delegate base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Render `html` to a PDF on the delegate and return the durable URL of
    /// the uploaded file.
    ///
    /// One attempt only; any delegate-side failure (bad secret → 401,
    /// missing html → 400, render/upload failure → 500) surfaces as
    /// [`RenderError`] with the upstream body attached.
    ///
    /// # Errors
    /// Returns [`RenderError`] on transport failure, non-success status, or
    /// an unparsable success body.
    pub async fn render_and_upload(
        &self,
        html: &str,
        filename: &str,
    ) -> Result<String, RenderError> {
        let response = self
            .client
            .post(format!("{}/render-and-upload", self.base_url))
            .header("x-worker-secret", &self.secret)
            .json(&RenderRequest { html, filename })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Could not read error body".to_owned());
            return Err(RenderError::HttpStatus { code: status.as_u16(), body });
        }

        let body = response.text().await?;
        let parsed: RenderResponse = serde_json::from_str(&body).map_err(|e| {
            RenderError::JsonParse {
                context: format!("render-and-upload response (body: {body})"),
                source: e,
            }
        })?;
        Ok(parsed.public_url)
    }
}
