//! Typed error enum for delegate calls.

use thiserror::Error;

/// Errors from the PDF rendering delegate.
///
/// Covers auth rejection, render failure, and storage failure on the
/// delegate side as well as transport failures. Never retried; by the time
/// the delegate is called the generation itself is already committed, so a
/// failure leaves the caller with HTML but no downloadable artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("client initialization failed: {0}")]
    ClientInit(String),
}
