use tracing::warn;

use crate::{
    management::Session,
    pipeline::{Pacing, filter_tracks, walk_pages},
    types::{PlaylistSummary, SearchResult, TrackSummary},
};

/// Every favorite track of the session user, in upstream order.
pub async fn list_favorites(session: &Session, pacing: &Pacing) -> Vec<TrackSummary> {
    let client = session.client.as_ref();
    let user_id = session.user_id.as_str();

    walk_pages(pacing, "favorites", move |offset, limit| {
        client.get_favorites_page(user_id, limit, offset)
    })
    .await
}

/// Filters the favorites by `query` and returns one `offset`/`limit` window of the matches.
pub async fn search_favorites(
    session: &Session,
    query: Option<&str>,
    limit: usize,
    offset: usize,
    pacing: &Pacing,
) -> SearchResult {
    let favorites = list_favorites(session, pacing).await;
    let matches = filter_tracks(&favorites, query);
    let total_count = matches.len();

    SearchResult {
        total_count,
        has_more: offset.saturating_add(limit) < total_count,
        tracks: matches.into_iter().skip(offset).take(limit).collect(),
    }
}

/// Every track of one playlist.
pub async fn get_playlist_tracks(
    session: &Session,
    playlist_id: &str,
    pacing: &Pacing,
) -> Vec<TrackSummary> {
    let client = session.client.as_ref();

    walk_pages(pacing, "playlist tracks", move |offset, limit| {
        client.get_playlist_page(playlist_id, limit, offset)
    })
    .await
}

/// Searches playlists, optionally moving the ones owned by the user to the front.
///
/// A failed search yields an empty list.
pub async fn search_playlists(
    session: &Session,
    term: &str,
    limit: usize,
    prioritize_user_playlists: bool,
) -> Vec<PlaylistSummary> {
    let playlists = match session.client.search_playlists(term, limit, 0).await {
        Ok(playlists) => playlists,
        Err(e) => {
            warn!(term, error = %e, "playlist search failed");
            return Vec::new();
        }
    };

    if !prioritize_user_playlists {
        return playlists;
    }

    let (mut own, others): (Vec<_>, Vec<_>) = playlists
        .into_iter()
        .partition(|p| p.owner_id.as_deref() == Some(session.user_id.as_str()));
    own.extend(others);
    own
}
