//! HTTP API server for storynest.

#![allow(missing_docs, reason = "Internal crate with self-explanatory API")]
#![allow(unreachable_pub, reason = "pub items are re-exported")]
#![allow(clippy::missing_docs_in_private_items, reason = "Internal crate")]
#![allow(clippy::implicit_return, reason = "Implicit return is idiomatic Rust")]
#![allow(clippy::question_mark_used, reason = "? operator is idiomatic Rust")]
#![allow(clippy::exhaustive_structs, reason = "HTTP types are stable")]

pub mod api_error;
mod api_types;
mod auth;
mod handlers;
#[cfg(test)]
mod tests;

use std::sync::Arc;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use storynest_core::JournalStore;
use storynest_service::GenerationService;

pub use api_error::ApiError;
pub use api_types::{GenerateResponse, ReadinessResponse, VersionResponse};
pub use auth::CurrentUser;

/// Shared application state for all HTTP handlers.
///
/// Wrapped in `Arc` for thread-safe sharing across handlers. Holds the
/// storage capability directly for the thin CRUD endpoints and the
/// generation service for the pipeline.
pub struct AppState {
    pub store: Arc<dyn JournalStore>,
    pub generation: GenerationService,
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/readiness", get(readiness))
        .route("/api/version", get(version))
        .route("/api/generate", post(handlers::generate::generate))
        .route(
            "/api/memories",
            get(handlers::journal::list_memories).post(handlers::journal::create_memory),
        )
        .route(
            "/api/children",
            get(handlers::journal::list_children).post(handlers::journal::create_child),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn readiness() -> (StatusCode, Json<ReadinessResponse>) {
    (StatusCode::OK, Json(ReadinessResponse { status: "ready", message: None }))
}

async fn version() -> Json<VersionResponse> {
    Json(VersionResponse { version: env!("CARGO_PKG_VERSION") })
}
