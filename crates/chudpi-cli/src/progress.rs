//! Progress bar driven by observer updates from a channel.

use std::thread::{self, JoinHandle};

use crossbeam_channel::Receiver;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use tracing::debug;

use chudpi_core::progress::ProgressUpdate;
use chudpi_orchestration::interfaces::ProgressReporter;

/// Resolution of the bar: one step per tenth of a percent.
const BAR_STEPS: u64 = 1000;

/// Progress reporter drawing an `indicatif` bar on stderr.
pub struct CLIProgressReporter {
    bar: ProgressBar,
}

impl CLIProgressReporter {
    /// Create a reporter drawing to stderr.
    #[must_use]
    pub fn new() -> Self {
        Self::with_bar(ProgressBar::with_draw_target(
            Some(BAR_STEPS),
            ProgressDrawTarget::stderr(),
        ))
    }

    /// Create a reporter that never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self::with_bar(ProgressBar::hidden())
    }

    fn with_bar(bar: ProgressBar) -> Self {
        let style = ProgressStyle::with_template("{msg:>14} [{bar:40.cyan/blue}] {percent:>3}% ETA {eta}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=> ");
        bar.set_style(style);
        bar.set_length(BAR_STEPS);
        Self { bar }
    }

    /// Current bar position, in tenths of a percent.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Drain `updates` on a background thread until every sender is dropped.
    #[must_use]
    pub fn spawn(self, updates: Receiver<ProgressUpdate>) -> JoinHandle<()> {
        thread::spawn(move || {
            for update in &updates {
                self.report(&update);
            }
            self.complete();
            debug!("Progress channel closed");
        })
    }
}

impl Default for CLIProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for CLIProgressReporter {
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
    fn report(&self, update: &ProgressUpdate) {
        self.bar.set_message(update.algorithm);
        let position = if update.done {
            BAR_STEPS
        } else {
            (update.progress.clamp(0.0, 1.0) * BAR_STEPS as f64) as u64
        };
        self.bar.set_position(position);
    }

    fn complete(&self) {
        self.bar.finish_and_clear();
    }
}
