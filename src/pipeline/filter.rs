use crate::types::TrackSummary;

/// Case-insensitive substring match over title, artist and album.
///
/// `query` must already be lowercase. An empty query matches everything.
pub fn matches_query(track: &TrackSummary, query: &str) -> bool {
    query.is_empty()
        || track.title.to_lowercase().contains(query)
        || track.artist.to_lowercase().contains(query)
        || track
            .album
            .as_ref()
            .is_some_and(|album| album.to_lowercase().contains(query))
}

/// Returns the tracks matching `query`, in their original order.
///
/// An absent or empty query returns every track.
pub fn filter_tracks(tracks: &[TrackSummary], query: Option<&str>) -> Vec<TrackSummary> {
    let query = query.unwrap_or_default().to_lowercase();
    tracks
        .iter()
        .filter(|track| matches_query(track, &query))
        .cloned()
        .collect()
}
