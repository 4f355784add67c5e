use std::collections::HashSet;

use tokio::time::sleep;
use tracing::info;

use crate::{
    management::Session,
    pipeline::{Pacing, ProgressReporter, walk_pages},
};

/// Gathers the unique track ids of several playlists.
///
/// Ids keep the order in which they were first seen; duplicates across
/// playlists collapse to one and empty ids are skipped. Playlists are walked
/// one after the other with `pacing.playlist_delay` in between. A playlist
/// whose walk breaks off early contributes what was fetched before the
/// failure and collection moves on to the next one.
pub async fn collect_track_ids(
    session: &Session,
    playlist_ids: &[String],
    pacing: &Pacing,
    progress: &mut ProgressReporter<'_>,
) -> Vec<String> {
    let client = session.client.as_ref();
    let mut seen_ids = HashSet::new();
    let mut track_ids = Vec::new();

    for (index, playlist_id) in playlist_ids.iter().enumerate() {
        progress
            .total(
                track_ids.len(),
                format!(
                    "Loading tracks from playlist {}/{}...",
                    index + 1,
                    playlist_ids.len()
                ),
            )
            .await;

        let playlist_id = playlist_id.as_str();
        let tracks = walk_pages(pacing, "playlist tracks", move |offset, limit| {
            client.get_playlist_page(playlist_id, limit, offset)
        })
        .await;

        let before = track_ids.len();
        for track in tracks {
            if !track.id.is_empty() && seen_ids.insert(track.id.clone()) {
                track_ids.push(track.id);
            }
        }
        info!(
            playlist_id,
            new_tracks = track_ids.len() - before,
            "collected playlist tracks"
        );

        if index + 1 < playlist_ids.len() {
            sleep(pacing.playlist_delay).await;
        }
    }

    track_ids
}
