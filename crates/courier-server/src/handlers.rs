//! HTTP request handlers for the Courier service.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use courier_alerts::AlertPayload;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{ServerError, ServerResult};
use crate::state::ServerState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, or `degraded` when the upstream monitor is unreachable.
    pub status: String,
    /// Server uptime in seconds.
    pub uptime_secs: u64,
    /// Alerts awaiting the next aggregation drain.
    pub pending_alerts: usize,
    /// Whether the upstream monitor answered its liveness probe; absent
    /// when no monitor is configured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monitor_reachable: Option<bool>,
}

/// Handle `POST <ingest path>` - alert webhook ingestion.
///
/// The body is parsed explicitly rather than through a typed extractor so
/// that every malformed-payload case answers the upstream's wire contract:
/// HTTP 500 with a plain `Error: ...` body. A well-formed payload is
/// appended to the pending batch and arms the aggregation window if idle;
/// an empty `alerts` array is still accepted but arms nothing.
pub async fn ingest_alerts(
    State(state): State<Arc<ServerState>>,
    body: Bytes,
) -> ServerResult<&'static str> {
    let payload: AlertPayload = serde_json::from_slice(&body).map_err(|e| {
        warn!(error = %e, "rejected malformed alert payload");
        ServerError::MalformedPayload(e.to_string())
    })?;

    let count = payload.alerts.len();
    let armed = state.aggregator().ingest(payload.alerts);

    info!(alerts = count, armed_window = armed, "accepted alert notification");
    Ok("OK")
}

/// Handle `GET /health` - service health.
pub async fn health_check(State(state): State<Arc<ServerState>>) -> Json<HealthResponse> {
    let monitor_reachable = match state.monitor() {
        Some(client) => Some(client.check_health().await),
        None => None,
    };

    let status = if monitor_reachable == Some(false) {
        "degraded"
    } else {
        "ok"
    };

    Json(HealthResponse {
        status: status.to_string(),
        uptime_secs: state.uptime_secs(),
        pending_alerts: state.pending_alerts(),
        monitor_reachable,
    })
}
