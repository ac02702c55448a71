use std::sync::Arc;

use axum::{
    Json,
    extract::{FromRequestParts, Path},
    http::{HeaderValue, StatusCode, header::AUTHORIZATION, header::WWW_AUTHENTICATE, request::Parts},
    response::{IntoResponse, Response},
};
use serde_json::json;

use super::helpers::{authorize, extract_bearer_token};
use crate::server::AppState;
use crate::types::Project;

/// Extractor that resolves the `{project_name}` route parameter to a project the
/// presented bearer token is valid for.
pub struct RequireProject(pub Project);

#[derive(Debug)]
pub enum AuthError {
    MissingAuth,
    InvalidScheme,
    InvalidToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("Rejected request: {self:?}");

        // Unknown projects and wrong tokens look the same from the outside.
        let body = json!({ "message": "Unauthorized" });
        let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
        response
            .headers_mut()
            .insert(WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        response
    }
}

impl FromRequestParts<Arc<AppState>> for RequireProject {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let Path(project_name) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .ok_or(AuthError::MissingAuth)?
            .to_str()
            .map_err(|_| AuthError::InvalidScheme)?;

        let raw_token = extract_bearer_token(auth_header)
            .ok_or(AuthError::InvalidScheme)?
            .to_owned();

        // SQLite lookups block; keep them off the async workers.
        let store = Arc::clone(&state.store);
        let project = tokio::task::spawn_blocking(move || {
            authorize(store.as_ref(), &raw_token, &project_name)
        })
        .await
        .map_err(|e| {
            tracing::error!("Token lookup task failed: {e}");
            AuthError::InvalidToken
        })?
        .ok_or(AuthError::InvalidToken)?;

        Ok(RequireProject(project))
    }
}
