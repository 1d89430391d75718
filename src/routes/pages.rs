use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use std::sync::Arc;
use tera::{Context, Tera};

use super::{upstream_error, video_key, RouteError};
use crate::services::listing::{build_listing, detail_listing, RandomShuffle};
use crate::AppState;

fn render(templates: &Tera, name: &str, context: &Context) -> Result<Html<String>, RouteError> {
    templates.render(name, context).map(Html).map_err(|e| {
        tracing::error!("Failed to render {}: {}", name, e);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": "Internal error" })),
        )
    })
}

/// GET / - Shuffled playlist thumbnails
pub async fn video_index(State(state): State<Arc<AppState>>) -> Result<Html<String>, RouteError> {
    let videos = build_listing(&state.plex, &RandomShuffle, None)
        .await
        .map_err(upstream_error)?;

    let mut context = Context::new();
    context.insert("videos", &videos);
    render(&state.templates, "video_index.html", &context)
}

/// GET /video/*video_id - Player page with same-series suggestions
///
/// An unknown id still renders, without a current video.
pub async fn view_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Html<String>, RouteError> {
    let key = video_key(&video_id);
    let (current_video, videos) = detail_listing(&state.plex, &RandomShuffle, &key)
        .await
        .map_err(upstream_error)?;

    if current_video.is_none() {
        tracing::info!("Video {} not found on server", key);
    }

    let mut context = Context::new();
    context.insert("videos", &videos);
    context.insert("current_video", &current_video);
    render(&state.templates, "view_video.html", &context)
}
