//! Bearer-token authentication extractor.
//!
//! The identity collaborator is a narrow token→user lookup on the storage
//! capability. Handlers take a `CurrentUser` argument; requests without a
//! resolvable token are rejected before the handler body runs.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::{ApiError, AppState};

/// The authenticated caller.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|h| h.strip_prefix("Bearer "));
        let Some(token) = token else {
            return Err(ApiError::Unauthorized("no_token".to_owned()));
        };

        match state.store.lookup_token(token).await {
            Ok(Some(user_id)) => Ok(Self { id: user_id }),
            Ok(None) => Err(ApiError::Unauthorized("invalid_token".to_owned())),
            Err(e) => {
                tracing::error!(error = %e, "token lookup failed");
                Err(ApiError::Unauthorized("auth_unavailable".to_owned()))
            },
        }
    }
}
