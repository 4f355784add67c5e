use tabled::Table;

use crate::{
    cli::{auth::login, progress::BarSink, progress::spinner},
    info,
    pipeline::{self, Pacing},
    success,
    types::TrackTableRow,
    warning,
};

pub async fn import(playlist_ids: Vec<String>) {
    let session = login().await;

    info!("Importing {} playlists into favorites", playlist_ids.len());
    let sink = BarSink::new();
    pipeline::run_import(&session, &playlist_ids, &sink, &Pacing::default()).await;
}

pub async fn list_favorites(search: Option<String>, limit: usize, offset: usize) {
    let session = login().await;

    let pb = spinner("Loading favorites...");
    let result =
        pipeline::search_favorites(&session, search.as_deref(), limit, offset, &Pacing::default())
            .await;
    pb.finish_and_clear();

    if result.tracks.is_empty() {
        warning!("No favorites found.");
        return;
    }

    let table_rows: Vec<TrackTableRow> = result.tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(table_rows));

    info!(
        "Showing {}-{} of {} favorites",
        offset + 1,
        offset + result.tracks.len(),
        result.total_count
    );
    if result.has_more {
        info!("More results with --offset {}", offset + limit);
    }
}

pub async fn preview(query: Option<String>) {
    let session = login().await;

    let pb = spinner("Loading and filtering favorites...");
    let result = pipeline::preview_filtered(&session, query.as_deref(), &Pacing::default()).await;
    pb.finish_and_clear();

    if result.total_count == 0 {
        warning!("No favorites match.");
        return;
    }

    success!("{} favorites match", result.total_count);
    let table_rows: Vec<TrackTableRow> =
        result.sample_tracks.iter().map(TrackTableRow::from).collect();
    println!("{}", Table::new(table_rows));
}

/// Deletes favorites matching `query`, or all of them with `all`.
///
/// Without `yes` only a preview is shown.
pub async fn delete(query: Option<String>, all: bool, yes: bool) {
    if !yes {
        preview(if all { None } else { query }).await;
        warning!("Nothing deleted. Re-run with --yes to delete these favorites.");
        return;
    }

    let session = login().await;
    let sink = BarSink::new();
    let pacing = Pacing::default();

    if all {
        pipeline::run_delete_all(&session, &sink, &pacing).await;
    } else {
        pipeline::run_delete_filtered(&session, query.as_deref(), &sink, &pacing).await;
    }
}
