pub mod api;
pub mod health;
pub mod pages;

use axum::{http::StatusCode, Json};

use crate::services::plex::PlexError;

/// Error response shared by the page and API handlers
pub type RouteError = (StatusCode, Json<serde_json::Value>);

/// Map a failed upstream call to 502
pub(crate) fn upstream_error(e: PlexError) -> RouteError {
    tracing::error!("Plex request failed: {}", e);
    (
        StatusCode::BAD_GATEWAY,
        Json(serde_json::json!({ "error": "Media server unavailable", "detail": e.to_string() })),
    )
}

/// Turn a wildcard capture into a server key.
///
/// `/video/library/metadata/7` captures `library/metadata/7`, while Plex keys
/// carry a leading slash.
pub(crate) fn video_key(capture: &str) -> String {
    if capture.starts_with('/') {
        capture.to_string()
    } else {
        format!("/{}", capture)
    }
}
