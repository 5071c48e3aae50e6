//! Route configuration for the Courier service.

use std::sync::Arc;

use axum::routing::{get, post, Router};
use tower_http::trace::TraceLayer;

use crate::handlers::{health_check, ingest_alerts};
use crate::state::ServerState;

/// Create the service router.
///
/// The ingestion endpoint is mounted on the configured path; the health
/// endpoint is always `/health`.
pub fn create_router(state: Arc<ServerState>) -> Router {
    let ingest_path = state.config().ingest_path.clone();

    Router::new()
        .route(&ingest_path, post(ingest_alerts))
        .route("/health", get(health_check))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
