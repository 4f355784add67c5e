use tracing::info;

use crate::{
    management::Session,
    pipeline::{Mutation, Pacing, ProgressReporter, ProgressSink, collect_track_ids, run_batches},
};

/// Adds every track of the given playlists to the user's favorites.
///
/// All results are reported through `sink`; the last snapshot is the only
/// completed one. Empty input or playlists without tracks complete the run
/// right away with an explanatory `error_message`.
pub async fn run_import(
    session: &Session,
    playlist_ids: &[String],
    sink: &dyn ProgressSink,
    pacing: &Pacing,
) {
    let mut progress = ProgressReporter::new(sink);
    info!(user_id = %session.user_id, playlists = playlist_ids.len(), "import started");

    if playlist_ids.is_empty() {
        progress
            .complete(
                "No playlists selected",
                Some("No playlists were selected".to_string()),
            )
            .await;
        return;
    }

    progress.status("Starting import process...").await;

    let track_ids = collect_track_ids(session, playlist_ids, pacing, &mut progress).await;

    if track_ids.is_empty() {
        progress
            .complete(
                "No tracks found to import",
                Some("No tracks were found in the selected playlists".to_string()),
            )
            .await;
        return;
    }

    run_batches(
        session.client.as_ref(),
        &track_ids,
        Mutation::Add,
        pacing,
        &mut progress,
    )
    .await;
}
