//! Typed API error for HTTP handlers.
//!
//! Converts pipeline errors into the wire contract: stage-specific error
//! codes with upstream detail for 500s, a human-readable message for 429,
//! and the auth/validation shapes the web frontend expects.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use storynest_service::GenerationError;

/// API error with HTTP status code and JSON body.
///
/// Use via `Result<Json<T>, ApiError>` in handlers.
#[derive(Debug)]
pub enum ApiError {
    /// 401 — missing or invalid caller credential.
    Unauthorized(String),
    /// 400 — missing required identifier or malformed input.
    BadRequest(String),
    /// 429 — the monthly free allowance is spent.
    QuotaExceeded { quota: u32 },
    /// 500 with a stage-specific error code and upstream detail.
    Stage { code: &'static str, details: String },
    /// 500 — unexpected failure. Details logged, not exposed.
    Internal(anyhow::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            Self::Unauthorized(details) => (
                StatusCode::UNAUTHORIZED,
                serde_json::json!({"error": "Unauthorized", "details": details}),
            ),
            Self::BadRequest(message) => {
                (StatusCode::BAD_REQUEST, serde_json::json!({"error": message}))
            },
            Self::QuotaExceeded { quota } => (
                StatusCode::TOO_MANY_REQUESTS,
                serde_json::json!({
                    "error": "quota_exceeded",
                    "message": format!("Monthly quota of {quota} reached"),
                }),
            ),
            Self::Stage { code, details } => {
                tracing::error!(code, details, "pipeline stage failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({"error": code, "details": details}),
                )
            },
            Self::Internal(err) => {
                tracing::error!(error = ?err, "internal server error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::json!({"error": "internal server error"}),
                )
            },
        };
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<GenerationError> for ApiError {
    fn from(err: GenerationError) -> Self {
        match err {
            GenerationError::QuotaExceeded { quota } => Self::QuotaExceeded { quota },
            GenerationError::UsageRead(e) => {
                Self::Stage { code: "usage_read_failed", details: e.to_string() }
            },
            GenerationError::Provider(e) => {
                Self::Stage { code: "ai_failed", details: e.to_string() }
            },
            GenerationError::PdfDelegate(e) => {
                Self::Stage { code: "worker_failed", details: e.to_string() }
            },
            GenerationError::Storage(e) => Self::Internal(e),
            GenerationError::Theme(e) => Self::Internal(e.into()),
        }
    }
}
