//! # Favorites Pipeline
//!
//! The orchestration between the Qobuz client and the progress stream. A run
//! walks paginated listings, narrows them down to a list of track ids, and
//! feeds that list in fixed-size batches to an add or remove call.
//!
//! ```text
//! paginate ──► collect (import)  ──┐
//!          └─► filter  (cleanup) ──┴─► batch ──► progress ──► ProgressSink
//! ```
//!
//! ## Run lifecycle
//!
//! Every run (`run_import`, `run_delete_all`, `run_delete_filtered`) goes
//! through `Idle → Collecting → Mutating → Completed`, or straight from
//! `Idle` to `Completed` when nothing was found to act on. In the second case
//! the final snapshot carries an `error_message` that explains the no-op.
//! Exactly one snapshot per run has `is_completed == true`, and it is the
//! last one.
//!
//! ## Failure policy
//!
//! Nothing inside a run aborts it. A failing page ends that pagination walk
//! with what was fetched so far, a failing batch is retried one id at a time,
//! and individual failures only show up in `failed_tracks`. All batch
//! failures are handled the same way regardless of their cause.
//!
//! ## Pacing
//!
//! All delays are real `tokio::time::sleep` suspensions taken from [`Pacing`].
//! A run is strictly sequential; separate runs share nothing but the session
//! registry.

mod batch;
mod cleanup;
mod collect;
mod filter;
mod import;
mod library;
mod paginate;
mod progress;

use std::time::Duration;

pub use batch::{BatchOutcome, Mutation, run_batches};
pub use cleanup::{preview_filtered, run_delete_all, run_delete_filtered};
pub use collect::collect_track_ids;
pub use filter::{filter_tracks, matches_query};
pub use import::run_import;
pub use library::{get_playlist_tracks, list_favorites, search_favorites, search_playlists};
pub use paginate::walk_pages;
pub use progress::{ProgressReporter, ProgressSink};

/// Number of tracks shown in a filtered preview.
pub const PREVIEW_SAMPLE_SIZE: usize = 5;

/// Page sizes and fixed delays used to stay gentle with the Qobuz API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// `limit` of every paginated fetch
    pub page_size: usize,
    /// Maximum number of ids per add/remove call
    pub batch_size: usize,
    /// Pause between two page fetches of one walk
    pub page_delay: Duration,
    /// Pause between two playlists while collecting
    pub playlist_delay: Duration,
    /// Pause between two batches
    pub batch_delay: Duration,
    /// Pause between single-id calls after a batch failed
    pub fallback_delay: Duration,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            page_size: 50,
            batch_size: 50,
            page_delay: Duration::from_millis(500),
            playlist_delay: Duration::from_millis(1000),
            batch_delay: Duration::from_millis(2000),
            fallback_delay: Duration::from_millis(500),
        }
    }
}
