use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::types::ProgressUpdate;

/// Destination of the snapshots of one run, typically one client connection.
///
/// `send` is awaited before the run continues so snapshots arrive in emission
/// order. Delivery problems are the sink's business; the run never fails
/// because of them.
#[async_trait]
pub trait ProgressSink: Send + Sync {
    async fn send(&self, update: ProgressUpdate);
}

#[async_trait]
impl ProgressSink for UnboundedSender<ProgressUpdate> {
    async fn send(&self, update: ProgressUpdate) {
        if UnboundedSender::send(self, update).is_err() {
            debug!("progress receiver dropped");
        }
    }
}

/// The single evolving snapshot of a run and the sink it is reported to.
///
/// Counters only grow and the run is completed at most once. Anything emitted
/// after completion is dropped.
pub struct ProgressReporter<'a> {
    sink: &'a dyn ProgressSink,
    snapshot: ProgressUpdate,
}

impl<'a> ProgressReporter<'a> {
    pub fn new(sink: &'a dyn ProgressSink) -> Self {
        Self {
            sink,
            snapshot: ProgressUpdate::default(),
        }
    }

    pub fn snapshot(&self) -> &ProgressUpdate {
        &self.snapshot
    }

    pub fn is_completed(&self) -> bool {
        self.snapshot.is_completed
    }

    /// Emits the current counters with a new status line.
    pub async fn status(&mut self, status: impl Into<String>) {
        if self.ignore_after_completion() {
            return;
        }
        self.snapshot.current_status = status.into();
        self.sink.send(self.snapshot.clone()).await;
    }

    /// Raises the announced total, used while collecting and when mutation starts.
    pub async fn total(&mut self, total: usize, status: impl Into<String>) {
        if self.ignore_after_completion() {
            return;
        }
        self.snapshot.total_tracks = self.snapshot.total_tracks.max(total);
        self.status(status).await;
    }

    /// Accounts for one finished unit of work and emits the result.
    pub async fn record(&mut self, succeeded: usize, failed: usize, status: impl Into<String>) {
        if self.ignore_after_completion() {
            return;
        }
        self.snapshot.successful_tracks += succeeded;
        self.snapshot.failed_tracks += failed;
        self.snapshot.processed_tracks += succeeded + failed;
        self.status(status).await;
    }

    /// Emits the terminal snapshot.
    pub async fn complete(&mut self, status: impl Into<String>, error_message: Option<String>) {
        if self.snapshot.is_completed {
            return;
        }
        self.snapshot.current_status = status.into();
        self.snapshot.error_message = error_message;
        self.snapshot.is_completed = true;
        self.sink.send(self.snapshot.clone()).await;
    }

    fn ignore_after_completion(&self) -> bool {
        if self.snapshot.is_completed {
            debug!("run already completed, dropping update");
        }
        self.snapshot.is_completed
    }
}
