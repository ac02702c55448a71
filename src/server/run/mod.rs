mod handlers;

use std::sync::Arc;

use axum::{Router, routing::post};

use crate::server::AppState;

pub fn run_router() -> Router<Arc<AppState>> {
    Router::new().route("/run/{project_name}", post(handlers::run))
}
