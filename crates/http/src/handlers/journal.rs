//! Thin CRUD endpoints for children and memories.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use storynest_core::{Child, Memory, NewMemory};

use crate::api_types::{CreateChildRequest, CreateMemoryRequest, MemoryListParams};
use crate::auth::CurrentUser;
use crate::{ApiError, AppState};

/// `GET /api/memories?childId=` — a child's memories, dated ones first.
pub async fn list_memories(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Query(params): Query<MemoryListParams>,
) -> Result<Json<Vec<Memory>>, ApiError> {
    let child_id = params
        .child_id
        .ok_or_else(|| ApiError::BadRequest("childId required".to_owned()))?;
    let memories = state.store.list_memories(child_id).await?;
    Ok(Json(memories))
}

/// `POST /api/memories` — record a memory for a child.
pub async fn create_memory(
    State(state): State<Arc<AppState>>,
    _user: CurrentUser,
    Json(body): Json<CreateMemoryRequest>,
) -> Result<(StatusCode, Json<Memory>), ApiError> {
    let child_id = body
        .child_id
        .ok_or_else(|| ApiError::BadRequest("childId required".to_owned()))?;
    let memory = NewMemory {
        child_id,
        note: body.note,
        image_path: body.image_path,
        taken_at: body.taken_at,
    };
    let created = state.store.add_memory(&memory).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/children` — the caller's children, insertion-ordered.
pub async fn list_children(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
) -> Result<Json<Vec<Child>>, ApiError> {
    let children = state.store.list_children(&user.id).await?;
    Ok(Json(children))
}

/// `POST /api/children` — create a child for the caller.
pub async fn create_child(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Json(body): Json<CreateChildRequest>,
) -> Result<(StatusCode, Json<Child>), ApiError> {
    let name = body.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("name required".to_owned()));
    }
    let child = state.store.add_child(&user.id, name).await?;
    Ok((StatusCode::CREATED, Json(child)))
}
