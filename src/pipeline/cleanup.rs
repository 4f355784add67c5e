use tracing::info;

use crate::{
    management::Session,
    pipeline::{
        Mutation, PREVIEW_SAMPLE_SIZE, Pacing, ProgressReporter, ProgressSink, filter_tracks,
        list_favorites, run_batches,
    },
    types::{PreviewResult, TrackSummary},
};

/// Counts the favorites matching `query` and returns the first few of them.
///
/// Always works on a fresh listing; nothing is cached between calls.
pub async fn preview_filtered(
    session: &Session,
    query: Option<&str>,
    pacing: &Pacing,
) -> PreviewResult {
    let favorites = list_favorites(session, pacing).await;
    let matches = filter_tracks(&favorites, query);

    PreviewResult {
        total_count: matches.len(),
        sample_tracks: matches.into_iter().take(PREVIEW_SAMPLE_SIZE).collect(),
    }
}

/// Removes every favorite track of the session user.
pub async fn run_delete_all(session: &Session, sink: &dyn ProgressSink, pacing: &Pacing) {
    let mut progress = ProgressReporter::new(sink);
    info!(user_id = %session.user_id, "delete all started");

    progress.status("Loading current favorites...").await;
    let favorites = list_favorites(session, pacing).await;

    let track_ids = deletable_ids(favorites);
    if track_ids.is_empty() {
        progress
            .complete(
                "No favorites found to delete",
                Some("There are no favorites to delete".to_string()),
            )
            .await;
        return;
    }

    run_batches(
        session.client.as_ref(),
        &track_ids,
        Mutation::Remove,
        pacing,
        &mut progress,
    )
    .await;
}

/// Removes the favorite tracks matching `query`.
///
/// The favorites are listed and filtered again at the start of the run, so a
/// preview shown earlier is never acted upon directly.
pub async fn run_delete_filtered(
    session: &Session,
    query: Option<&str>,
    sink: &dyn ProgressSink,
    pacing: &Pacing,
) {
    let mut progress = ProgressReporter::new(sink);
    info!(user_id = %session.user_id, query = query.unwrap_or_default(), "filtered delete started");

    progress.status("Loading and filtering favorites...").await;
    let favorites = list_favorites(session, pacing).await;

    let track_ids = deletable_ids(filter_tracks(&favorites, query));
    if track_ids.is_empty() {
        progress
            .complete(
                "No matching favorites found to delete",
                Some(match query {
                    Some(q) if !q.is_empty() => format!("No favorites match \"{}\"", q),
                    _ => "There are no favorites to delete".to_string(),
                }),
            )
            .await;
        return;
    }

    run_batches(
        session.client.as_ref(),
        &track_ids,
        Mutation::Remove,
        pacing,
        &mut progress,
    )
    .await;
}

/// Ids of the given favorites, leaving out records that came back without one.
fn deletable_ids(tracks: Vec<TrackSummary>) -> Vec<String> {
    tracks
        .into_iter()
        .map(|t| t.id)
        .filter(|id| !id.is_empty())
        .collect()
}
