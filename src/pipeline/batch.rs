use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::{
    Res,
    pipeline::{Pacing, ProgressReporter},
    qobuz::QobuzApi,
};

/// The favorites change applied to every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Add,
    Remove,
}

impl Mutation {
    async fn apply(self, api: &dyn QobuzApi, track_ids: &[String]) -> Res<bool> {
        match self {
            Mutation::Add => api.add_favorites(track_ids).await,
            Mutation::Remove => api.remove_favorites(track_ids).await,
        }
    }

    fn starting_status(self, total: usize) -> String {
        match self {
            Mutation::Add => format!("Adding {} tracks to favorites...", total),
            Mutation::Remove => format!("Deleting {} tracks from favorites...", total),
        }
    }

    fn batch_status(self, current: usize, batches: usize) -> String {
        match self {
            Mutation::Add => format!("Processing batch {}/{}...", current, batches),
            Mutation::Remove => format!("Deleting batch {}/{}...", current, batches),
        }
    }

    fn completed_status(self) -> &'static str {
        match self {
            Mutation::Add => "Import completed!",
            Mutation::Remove => "Delete completed!",
        }
    }
}

/// Final counters of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchOutcome {
    pub processed: usize,
    pub successful: usize,
    pub failed: usize,
}

/// Applies `mutation` to `track_ids` in consecutive batches and completes the run.
///
/// Each batch is submitted in one call. An acknowledged call counts the whole
/// batch as successful and an unacknowledged answer counts it as failed. A
/// call that errors is followed by one call per id of that batch, spaced by
/// `pacing.fallback_delay`, each counted on its own. A snapshot is emitted
/// before and after every batch, batches are separated by
/// `pacing.batch_delay`, and the run ends with the completed snapshot.
///
/// Callers are expected to short-circuit on an empty id list.
pub async fn run_batches(
    api: &dyn QobuzApi,
    track_ids: &[String],
    mutation: Mutation,
    pacing: &Pacing,
    progress: &mut ProgressReporter<'_>,
) -> BatchOutcome {
    let batch_size = pacing.batch_size.max(1);
    let total = track_ids.len();
    let batches = total.div_ceil(batch_size);
    let mut outcome = BatchOutcome::default();

    progress
        .total(total, mutation.starting_status(total))
        .await;

    for (index, batch) in track_ids.chunks(batch_size).enumerate() {
        let current = index + 1;
        progress.status(mutation.batch_status(current, batches)).await;

        let (succeeded, failed) = match mutation.apply(api, batch).await {
            Ok(true) => (batch.len(), 0),
            Ok(false) => {
                warn!(?mutation, current, batches, "batch was not acknowledged");
                (0, batch.len())
            }
            Err(e) => {
                warn!(?mutation, current, batches, error = %e, "batch failed, retrying ids one by one");
                apply_one_by_one(api, batch, mutation, pacing).await
            }
        };

        outcome.successful += succeeded;
        outcome.failed += failed;
        outcome.processed += succeeded + failed;

        progress
            .record(
                succeeded,
                failed,
                format!("Batch {}/{} completed", current, batches),
            )
            .await;

        if current < batches {
            sleep(pacing.batch_delay).await;
        }
    }

    info!(
        ?mutation,
        processed = outcome.processed,
        successful = outcome.successful,
        failed = outcome.failed,
        "batch run finished"
    );
    progress.complete(mutation.completed_status(), None).await;

    outcome
}

async fn apply_one_by_one(
    api: &dyn QobuzApi,
    batch: &[String],
    mutation: Mutation,
    pacing: &Pacing,
) -> (usize, usize) {
    let mut succeeded = 0;
    let mut failed = 0;

    for (index, track_id) in batch.iter().enumerate() {
        match mutation.apply(api, std::slice::from_ref(track_id)).await {
            Ok(true) => succeeded += 1,
            Ok(false) => failed += 1,
            Err(e) => {
                debug!(?mutation, track_id = %track_id, error = %e, "single track failed");
                failed += 1;
            }
        }

        if index + 1 < batch.len() {
            sleep(pacing.fallback_delay).await;
        }
    }

    (succeeded, failed)
}
