use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde_json::{Value, json};
use tracing::info;

use crate::server::dto::Deployment;
use crate::server::response::ApiError;

pub async fn deploy(
    payload: Result<Json<Deployment>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    // Syntax errors and a missing content type are 422 too, not axum's 400/415.
    let Json(deployment) = payload.map_err(|rejection| {
        tracing::debug!("Rejected deployment request: {rejection}");
        ApiError::unprocessable(rejection.body_text())
    })?;

    info!(
        "Deployment requested for project '{}' at version '{}'",
        deployment.project, deployment.version
    );

    Ok(Json(json!({})))
}
