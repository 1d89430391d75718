use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use super::{upstream_error, video_key, RouteError};
use crate::models::{DetailResponse, ListingResponse};
use crate::services::listing::{build_listing, detail_listing, RandomShuffle};
use crate::AppState;

/// GET /api/videos - Index listing as JSON
pub async fn list_videos(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ListingResponse>, RouteError> {
    let videos = build_listing(&state.plex, &RandomShuffle, None)
        .await
        .map_err(upstream_error)?;

    Ok(Json(ListingResponse { videos }))
}

/// GET /api/videos/*video_id - Detail listing as JSON
pub async fn get_video(
    State(state): State<Arc<AppState>>,
    Path(video_id): Path<String>,
) -> Result<Json<DetailResponse>, RouteError> {
    let (current_video, videos) = detail_listing(&state.plex, &RandomShuffle, &video_key(&video_id))
        .await
        .map_err(upstream_error)?;

    Ok(Json(DetailResponse {
        current_video,
        videos,
    }))
}
