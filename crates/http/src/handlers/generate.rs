use std::sync::Arc;

use axum::extract::{Query, State};
use axum::Json;

use storynest_core::GenerationRequest;

use crate::api_types::{GenerateParams, GenerateResponse};
use crate::auth::CurrentUser;
use crate::{ApiError, AppState};

/// `POST /api/generate?childId=&interval=&pdf=&theme=`
///
/// Runs the generation pipeline for the authenticated caller. The response
/// carries `pdfUrl` only when a PDF was requested and the delegate is
/// configured.
pub async fn generate(
    State(state): State<Arc<AppState>>,
    user: CurrentUser,
    Query(params): Query<GenerateParams>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let child_id = params
        .child_id
        .ok_or_else(|| ApiError::BadRequest("childId required".to_owned()))?;
    let request = GenerationRequest {
        child_id,
        interval: params.interval,
        theme: params.theme,
        pdf: params.pdf,
    };
    let artifact = state.generation.generate(&user.id, &request).await?;
    Ok(Json(artifact.into()))
}
