use tabled::Table;

use crate::{
    cli::{auth::login, progress::spinner},
    info,
    pipeline::{self, Pacing},
    types::{PlaylistTableRow, TrackTableRow},
    warning,
};

pub async fn search_playlists(term: String, limit: usize, mine_first: bool) {
    let session = login().await;

    let pb = spinner(&format!("Searching playlists for \"{}\"...", term));
    let playlists = pipeline::search_playlists(&session, &term, limit, mine_first).await;
    pb.finish_and_clear();

    if playlists.is_empty() {
        warning!("No playlists found for \"{}\".", term);
        return;
    }

    info!("Found {} playlists", playlists.len());
    let table_rows: Vec<PlaylistTableRow> = playlists
        .into_iter()
        .map(|p| PlaylistTableRow {
            id: p.id,
            name: p.name,
            tracks: p.tracks_count,
        })
        .collect();

    println!("{}", Table::new(table_rows));
}

pub async fn playlist_tracks(playlist_id: String) {
    let session = login().await;

    let pb = spinner("Fetching playlist tracks...");
    let tracks = pipeline::get_playlist_tracks(&session, &playlist_id, &Pacing::default()).await;
    pb.finish_and_clear();

    if tracks.is_empty() {
        warning!("Playlist {} has no tracks or could not be loaded.", playlist_id);
        return;
    }

    info!("Playlist {} has {} tracks", playlist_id, tracks.len());
    let table_rows: Vec<TrackTableRow> = tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(table_rows));
}
