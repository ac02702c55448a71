use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{Router, routing::get};

use super::deploy::deploy_router;
use super::run::run_router;
use crate::store::Store;

pub struct AppState {
    pub store: Arc<dyn Store>,
    /// Upper bound for a single command run. `None` waits for the command to finish.
    pub command_timeout: Option<Duration>,
}

impl AppState {
    #[must_use]
    pub fn new(store: Arc<dyn Store>, command_timeout: Option<Duration>) -> Self {
        Self {
            store,
            command_timeout,
        }
    }
}

async fn health() -> &'static str {
    "OK"
}

async fn log_request(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();
    let start = Instant::now();

    let response = next.run(request).await;

    let latency = start.elapsed();
    let status = response.status();

    tracing::info!(
        "{} {} {} {}ms",
        method,
        uri.path(),
        status.as_u16(),
        latency.as_millis()
    );

    response
}

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(run_router())
        .layer(middleware::from_fn(log_request))
        .with_state(state)
}

/// Router for the companion deployment service.
pub fn create_deploy_router() -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(deploy_router())
        .layer(middleware::from_fn(log_request))
}
