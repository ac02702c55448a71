use std::path::Path;
use std::sync::Arc;

use axum::{Json, extract::State};
use tracing::{info, warn};

use crate::auth::RequireProject;
use crate::exec::{run_command, run_command_with_timeout};
use crate::server::AppState;
use crate::server::dto::RunResponse;
use crate::server::response::ApiError;

pub async fn run(
    State(state): State<Arc<AppState>>,
    RequireProject(project): RequireProject,
) -> Result<Json<RunResponse>, ApiError> {
    let directory = Path::new(&project.directory);

    info!("Running command for project '{}'", project.name);

    let result = match state.command_timeout {
        Some(timeout) => run_command_with_timeout(directory, &project.command, timeout).await,
        None => run_command(directory, &project.command).await,
    };

    let output = result.map_err(|e| {
        warn!("Command for project '{}' could not run: {e}", project.name);
        ApiError::internal("The command could not be executed.")
    })?;

    if !output.success() {
        warn!(
            "Command for project '{}' exited with status {}: {}",
            project.name,
            output.exit_status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Err(ApiError::internal(
            "Command returned with a non-zero return code.",
        ));
    }

    info!("Command for project '{}' succeeded", project.name);

    Ok(Json(RunResponse { success: true }))
}
