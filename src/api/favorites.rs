use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::info;

use crate::{
    api::{ApiError, CONNECTION_HEADER, CurrentSession, header_value},
    pipeline,
    server::AppState,
    types::{ImportRequest, PreviewResult, SearchResult},
};

#[derive(Debug, Deserialize)]
pub struct QueryParams {
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
    #[serde(default = "default_limit")]
    pub limit: usize,
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    50
}

/// Reads `X-Connection-Id` and checks that the progress connection is open.
async fn progress_connection(state: &AppState, headers: &HeaderMap) -> Result<String, ApiError> {
    let Some(connection_id) = header_value(headers, CONNECTION_HEADER) else {
        return Err(ApiError::BadRequest(
            "Progress connection ID is required".to_string(),
        ));
    };

    if !state.hub.is_connected(&connection_id).await {
        return Err(ApiError::BadRequest(
            "Unknown or closed progress connection".to_string(),
        ));
    }
    Ok(connection_id)
}

/// POST /api/favorites/import
pub async fn import(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    headers: HeaderMap,
    Json(request): Json<ImportRequest>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let connection_id = progress_connection(&state, &headers).await?;

    if request.playlist_ids.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one playlist ID is required".to_string(),
        ));
    }

    let playlist_count = request.playlist_ids.len();
    let sink = state.hub.sink(connection_id);
    let pacing = state.pacing;

    info!(user_id = %session.user_id, playlist_count, "starting import in background");
    tokio::spawn(async move {
        pipeline::run_import(&session, &request.playlist_ids, &sink, &pacing).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({
            "message": "Import process started",
            "playlistCount": playlist_count,
        })),
    ))
}

/// GET /api/favorites/current
pub async fn current(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Json<Value> {
    let favorites = pipeline::list_favorites(&session, &state.pacing).await;

    Json(json!({
        "count": favorites.len(),
        "tracks": favorites,
    }))
}

/// GET /api/favorites/search
pub async fn search(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<SearchParams>,
) -> Json<SearchResult> {
    let result = pipeline::search_favorites(
        &session,
        params.query.as_deref(),
        params.limit,
        params.offset,
        &state.pacing,
    )
    .await;
    Json(result)
}

/// GET /api/favorites/preview
pub async fn preview(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    Query(params): Query<QueryParams>,
) -> Json<PreviewResult> {
    let result =
        pipeline::preview_filtered(&session, params.query.as_deref(), &state.pacing).await;
    Json(result)
}

/// DELETE /api/favorites/delete-filtered
pub async fn delete_filtered(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    headers: HeaderMap,
    Query(params): Query<QueryParams>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let connection_id = progress_connection(&state, &headers).await?;
    let sink = state.hub.sink(connection_id);
    let pacing = state.pacing;

    tokio::spawn(async move {
        pipeline::run_delete_filtered(&session, params.query.as_deref(), &sink, &pacing).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "Filtered delete process started" })),
    ))
}

/// DELETE /api/favorites/delete-all
pub async fn delete_all(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    headers: HeaderMap,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let connection_id = progress_connection(&state, &headers).await?;
    let sink = state.hub.sink(connection_id);
    let pacing = state.pacing;

    tokio::spawn(async move {
        pipeline::run_delete_all(&session, &sink, &pacing).await;
    });

    Ok((
        StatusCode::ACCEPTED,
        Json(json!({ "message": "Delete process started" })),
    ))
}
