mod handlers;

use axum::{Router, routing::post};

pub fn deploy_router() -> Router {
    Router::new().route("/deploy", post(handlers::deploy))
}
