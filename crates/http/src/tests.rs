//! Router-level tests over a real SQLite store and the sample generator.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

use storynest_core::JournalStore;
use storynest_llm::ContentGenerator;
use storynest_service::GenerationService;
use storynest_storage::Storage;
use storynest_themes::ThemeRegistry;

use crate::{create_router, AppState};

const TOKEN: &str = "tok-alpha";
const USER: &str = "user-alpha";

async fn test_app(quota: u32) -> (TempDir, Arc<dyn JournalStore>, Router) {
    let dir = TempDir::new().unwrap();
    let storage = Storage::new(&dir.path().join("journal.db")).unwrap();
    let store: Arc<dyn JournalStore> = Arc::new(storage);
    store.grant_token(USER, TOKEN).await.unwrap();

    let generation = GenerationService::new(
        Arc::clone(&store),
        ContentGenerator::Sample,
        ThemeRegistry::new().unwrap(),
        None,
        quota,
    );
    let router = create_router(Arc::new(AppState { store: Arc::clone(&store), generation }));
    (dir, store, router)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

fn post(uri: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn version_endpoint_reports_package_version() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router
        .oneshot(Request::builder().uri("/api/version").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn generate_without_token_is_unauthorized() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate?childId=1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["details"], "no_token");
}

#[tokio::test]
async fn generate_with_unknown_token_is_unauthorized() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate?childId=1")
                .header("authorization", "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["details"], "invalid_token");
}

#[tokio::test]
async fn generate_without_child_id_is_rejected() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router.oneshot(post("/api/generate")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "childId required");
}

#[tokio::test]
async fn generate_renders_requested_theme_without_pdf_url() {
    let (_dir, store, router) = test_app(5).await;
    let child = store.add_child(USER, "Mia").await.unwrap();

    let uri = format!("/api/generate?childId={}&theme=fairy", child.id);
    let response = router.oneshot(post(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let story = body["storyHtml"].as_str().unwrap();
    assert!(story.contains("✨ The Adventures of Mia ✨"));
    assert!(story.contains("Sample content for Mia"));
    // no delegate configured, key must be absent rather than null
    assert!(body.get("pdfUrl").is_none());
    assert!(body["generatedAt"].is_string());
}

#[tokio::test]
async fn generate_falls_back_to_generic_name_for_unknown_child() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router.oneshot(post("/api/generate?childId=999")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert!(body["storyHtml"].as_str().unwrap().contains("Your child"));
}

#[tokio::test]
async fn generate_enforces_monthly_quota() {
    let (_dir, store, router) = test_app(2).await;
    let child = store.add_child(USER, "Leo").await.unwrap();
    let uri = format!("/api/generate?childId={}", child.id);

    for _ in 0..2 {
        let response = router.clone().oneshot(post(&uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = router.oneshot(post(&uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    let body = body_json(response).await;
    assert_eq!(body["error"], "quota_exceeded");
    assert_eq!(body["message"], "Monthly quota of 2 reached");
}

#[tokio::test]
async fn memories_roundtrip_through_the_api() {
    let (_dir, store, router) = test_app(5).await;
    let child = store.add_child(USER, "Ana").await.unwrap();

    let response = router
        .clone()
        .oneshot(post_json(
            "/api/memories",
            &json!({
                "childId": child.id,
                "note": "First steps",
                "takenAt": "2026-03-10T09:00:00Z",
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["note"], "First steps");

    let response = router
        .oneshot(get(&format!("/api/memories?childId={}", child.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["note"], "First steps");
}

#[tokio::test]
async fn create_memory_without_child_id_is_rejected() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router
        .oneshot(post_json("/api/memories", &json!({"note": "orphan"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "childId required");
}

#[tokio::test]
async fn list_memories_without_child_id_is_rejected() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router.oneshot(get("/api/memories")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn children_roundtrip_through_the_api() {
    let (_dir, _store, router) = test_app(5).await;

    let response = router
        .clone()
        .oneshot(post_json("/api/children", &json!({"name": "Theo"})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Theo");
    assert_eq!(created["user_id"], USER);

    let response = router.oneshot(get("/api/children")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let listed = body_json(response).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn create_child_with_blank_name_is_rejected() {
    let (_dir, _store, router) = test_app(5).await;
    let response = router
        .oneshot(post_json("/api/children", &json!({"name": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
