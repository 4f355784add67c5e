use std::time::Duration;

use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};

use crate::{pipeline::ProgressSink, success, types::ProgressUpdate, warning};

pub fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb.set_style(
        ProgressStyle::with_template("{spinner:.blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
    );
    pb
}

/// Renders the snapshots of a run as a terminal progress bar.
pub struct BarSink {
    bar: ProgressBar,
}

impl BarSink {
    pub fn new() -> Self {
        let bar = ProgressBar::new(0);
        bar.enable_steady_tick(Duration::from_millis(100));
        bar.set_style(
            ProgressStyle::with_template(
                "{spinner:.blue} [{bar:40.cyan/blue}] {pos}/{len} {msg}",
            )
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        Self { bar }
    }
}

impl Default for BarSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProgressSink for BarSink {
    async fn send(&self, update: ProgressUpdate) {
        self.bar.set_length(update.total_tracks as u64);
        self.bar.set_position(update.processed_tracks as u64);
        self.bar.set_message(update.current_status.clone());

        if !update.is_completed {
            return;
        }

        self.bar.finish_and_clear();
        if let Some(reason) = update.error_message {
            warning!("{}", reason);
            return;
        }

        success!(
            "{} {} of {} tracks succeeded.",
            update.current_status,
            update.successful_tracks,
            update.total_tracks
        );
        if update.failed_tracks > 0 {
            warning!("{} tracks failed.", update.failed_tracks);
        }
    }
}
