use crate::{
    Res,
    qobuz::QobuzClient,
    types::{PlaylistSearchResponse, PlaylistSummary, PlaylistTracksResponse, TrackSummary},
};

/// Searches public and user playlists by free text via `playlist/search`.
///
/// Qobuz matches the term against playlist names, descriptions and genres.
/// Results come back in Qobuz's relevance order; ordering the user's own
/// playlists first is left to the pipeline.
///
/// # Arguments
///
/// * `client` - Authenticated client of the session user
/// * `term` - Free text search term, passed through unchanged
/// * `limit` - Maximum number of playlists to return
/// * `offset` - Number of results to skip
///
/// # Returns
///
/// The playlists of the requested page mapped to [`PlaylistSummary`]. A
/// response without a `playlists` container yields an empty list.
///
/// # Errors
///
/// Returns [`crate::Error::Http`] on transport failures and
/// [`crate::Error::Api`] when Qobuz answers with a non-success status.
pub async fn search(
    client: &QobuzClient,
    term: &str,
    limit: usize,
    offset: usize,
) -> Res<Vec<PlaylistSummary>> {
    let response: PlaylistSearchResponse = client
        .get_json(
            "playlist/search",
            &[
                ("query", term.to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )
        .await?;

    Ok(response
        .playlists
        .map(|p| p.items.into_iter().map(PlaylistSummary::from).collect())
        .unwrap_or_default())
}

/// Fetches one page of a playlist's tracks via `playlist/get` with `extra=tracks`.
///
/// # Arguments
///
/// * `client` - Authenticated client of the session user
/// * `playlist_id` - Qobuz playlist id
/// * `limit` - Page size
/// * `offset` - Index of the first track of the page
///
/// # Returns
///
/// Up to `limit` tracks in playlist order. A playlist without a `tracks`
/// container yields an empty page, which ends a pagination walk.
///
/// # Errors
///
/// Unknown or private playlists come back as [`crate::Error::Api`] with the
/// status Qobuz reported (usually 404 or 401).
pub async fn get_tracks_page(
    client: &QobuzClient,
    playlist_id: &str,
    limit: usize,
    offset: usize,
) -> Res<Vec<TrackSummary>> {
    let response: PlaylistTracksResponse = client
        .get_json(
            "playlist/get",
            &[
                ("playlist_id", playlist_id.to_string()),
                ("extra", "tracks".to_string()),
                ("limit", limit.to_string()),
                ("offset", offset.to_string()),
            ],
        )
        .await?;

    Ok(response
        .tracks
        .map(|t| t.items.into_iter().map(TrackSummary::from).collect())
        .unwrap_or_default())
}
