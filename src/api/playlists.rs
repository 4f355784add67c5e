use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::{
    api::{ApiError, CurrentSession},
    pipeline,
    server::AppState,
    types::{PlaylistSummary, TrackSummary},
};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSearchParams {
    #[serde(default)]
    pub search_term: String,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default = "default_prioritize")]
    pub prioritize_user_playlists: bool,
}

fn default_limit() -> usize {
    20
}

fn default_prioritize() -> bool {
    true
}

/// GET /api/playlists/search
pub async fn search(
    CurrentSession(session): CurrentSession,
    Query(params): Query<PlaylistSearchParams>,
) -> Result<Json<Vec<PlaylistSummary>>, ApiError> {
    if params.search_term.trim().is_empty() {
        return Err(ApiError::BadRequest("Search term is required".to_string()));
    }

    let playlists = pipeline::search_playlists(
        &session,
        &params.search_term,
        params.limit,
        params.prioritize_user_playlists,
    )
    .await;
    Ok(Json(playlists))
}

/// GET /api/playlists/{playlist_id}/tracks
pub async fn tracks(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Path(playlist_id): Path<String>,
) -> Result<Json<Vec<TrackSummary>>, ApiError> {
    if playlist_id.trim().is_empty() {
        return Err(ApiError::BadRequest("Playlist ID is required".to_string()));
    }

    let tracks = pipeline::get_playlist_tracks(&session, &playlist_id, &state.pacing).await;
    Ok(Json(tracks))
}
