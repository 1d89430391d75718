use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::AppState;

/// Health check response
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: String,
    version: &'static str,
    uptime: u64,
    playlist_id: String,
}

/// GET /health - Process status
///
/// The media server is not probed; a page render is the real check.
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let status = if state.config.missing_plex_settings().is_empty() {
        "ok"
    } else {
        "misconfigured"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION"),
        uptime: state.start_time.elapsed().as_secs(),
        playlist_id: state.config.plex.playlist_id.clone(),
    })
}

/// Liveness probe
pub async fn live() -> impl IntoResponse {
    (StatusCode::OK, "alive")
}
