//! Observers the CLI attaches to a calculation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crossbeam_channel::Sender;
use tracing::{debug, info};

use crate::constants::PROGRESS_REPORT_THRESHOLD;
use crate::observer::{FrozenObserver, ProgressObserver};
use crate::progress::ProgressUpdate;

/// Forwards updates to a progress bar thread over a channel.
///
/// Updates pass through their own gate, so the receiver sees each
/// calculation's fractions in increasing order. A done update rearms the
/// gate for the next calculation.
pub struct ChannelObserver {
    sender: Sender<ProgressUpdate>,
    gate: FrozenObserver,
}

impl ChannelObserver {
    #[must_use]
    pub fn new(sender: Sender<ProgressUpdate>) -> Self {
        Self {
            sender,
            gate: FrozenObserver::new(PROGRESS_REPORT_THRESHOLD),
        }
    }
}

impl ProgressObserver for ChannelObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        // A full channel drops the update; a later one carries more progress.
        if update.done {
            self.gate.reset();
            let _ = self.sender.try_send(update.clone());
        } else {
            self.gate.report(update.progress, |_| {
                let _ = self.sender.try_send(update.clone());
            });
        }
    }

    fn freeze(&self) -> FrozenObserver {
        FrozenObserver::new(PROGRESS_REPORT_THRESHOLD)
    }
}

/// Writes series progress to the `tracing` log, at most once per interval.
pub struct LoggingObserver {
    gate: FrozenObserver,
    started: Instant,
    interval: Duration,
    /// Milliseconds since `started` of the last line, `u64::MAX` before the first.
    last_line_ms: AtomicU64,
}

impl LoggingObserver {
    /// Log at most one progress line every `min_interval_ms` milliseconds.
    #[must_use]
    pub fn new(min_interval_ms: u64) -> Self {
        Self {
            gate: FrozenObserver::new(PROGRESS_REPORT_THRESHOLD),
            started: Instant::now(),
            interval: Duration::from_millis(min_interval_ms),
            last_line_ms: AtomicU64::new(u64::MAX),
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn elapsed_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    fn interval_open(&self, now_ms: u64) -> bool {
        match self.last_line_ms.load(Ordering::Relaxed) {
            u64::MAX => true,
            last => Duration::from_millis(now_ms.saturating_sub(last)) >= self.interval,
        }
    }
}

impl ProgressObserver for LoggingObserver {
    fn on_progress(&self, update: &ProgressUpdate) {
        if update.done {
            self.gate.reset();
            info!(backend = %update.algorithm, "Binary splitting complete");
            return;
        }

        let now_ms = self.elapsed_ms();
        if !self.interval_open(now_ms) {
            return;
        }
        self.gate.report(update.progress, |progress| {
            debug!(
                backend = %update.algorithm,
                progress = format!("{:.1}%", progress * 100.0),
                terms = update.current_step,
                total = update.total_steps,
                "Series progress"
            );
            self.last_line_ms.store(now_ms, Ordering::Relaxed);
        });
    }

    fn freeze(&self) -> FrozenObserver {
        FrozenObserver::new(PROGRESS_REPORT_THRESHOLD)
    }
}

/// Null object: discards every progress update.
#[derive(Default)]
pub struct NoOpObserver;

impl NoOpObserver {
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl ProgressObserver for NoOpObserver {
    fn on_progress(&self, _update: &ProgressUpdate) {}

    fn freeze(&self) -> FrozenObserver {
        FrozenObserver::silent()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_observer_sends() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);

        observer.on_progress(&ProgressUpdate::new(0, "native", 0.5, 1, 2));

        let received = rx.try_recv().unwrap();
        assert_eq!(received.algorithm, "native");
        assert_eq!(received.current_step, 1);
    }

    #[test]
    fn channel_observer_skips_small_steps() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);

        observer.on_progress(&ProgressUpdate::new(0, "native", 0.015, 3, 200));
        assert!(rx.try_recv().is_ok());

        // 0.015 -> 0.02 is below the 1% step
        observer.on_progress(&ProgressUpdate::new(0, "native", 0.02, 4, 200));
        assert!(rx.try_recv().is_err());

        observer.on_progress(&ProgressUpdate::new(0, "native", 0.03, 6, 200));
        assert!(rx.try_recv().is_ok());
    }

    #[test]
    fn channel_observer_drops_stale_fractions() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);

        observer.on_progress(&ProgressUpdate::new(0, "native", 0.7, 70, 100));
        observer.on_progress(&ProgressUpdate::new(0, "native", 0.4, 40, 100));

        let sent: Vec<_> = rx.try_iter().map(|u| u.current_step).collect();
        assert_eq!(sent, vec![70]);
    }

    #[test]
    fn channel_observer_always_sends_done() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);

        observer.on_progress(&ProgressUpdate::new(0, "native", 0.995, 199, 200));
        observer.on_progress(&ProgressUpdate::done(0, "native"));

        let last = rx.try_iter().last().unwrap();
        assert!(last.done);
    }

    #[test]
    fn channel_observer_rearms_after_done() {
        let (tx, rx) = crossbeam_channel::bounded(10);
        let observer = ChannelObserver::new(tx);

        observer.on_progress(&ProgressUpdate::new(0, "native", 0.9, 90, 100));
        observer.on_progress(&ProgressUpdate::done(0, "native"));
        observer.on_progress(&ProgressUpdate::new(1, "gmp", 0.2, 20, 100));

        let indices: Vec<_> = rx.try_iter().map(|u| (u.calc_index, u.done)).collect();
        assert_eq!(indices, vec![(0, false), (0, true), (1, false)]);
    }

    #[test]
    fn channel_observer_full_channel_does_not_block() {
        let (tx, _rx) = crossbeam_channel::bounded(1);
        let observer = ChannelObserver::new(tx);

        observer.on_progress(&ProgressUpdate::new(0, "native", 0.02, 1, 100));
        observer.on_progress(&ProgressUpdate::new(0, "native", 0.05, 5, 100));
        observer.on_progress(&ProgressUpdate::done(0, "native"));
    }

    #[test]
    fn logging_observer_first_line_is_not_throttled() {
        let observer = LoggingObserver::new(60_000);
        observer.on_progress(&ProgressUpdate::new(0, "native", 0.05, 5, 100));
        assert!((observer.gate.last_claimed() - 0.05).abs() < f64::EPSILON);

        // Inside the interval: nothing more is claimed.
        observer.on_progress(&ProgressUpdate::new(0, "native", 0.5, 50, 100));
        assert!((observer.gate.last_claimed() - 0.05).abs() < f64::EPSILON);
    }

    #[test]
    fn logging_observer_skips_small_steps() {
        let observer = LoggingObserver::new(0);
        observer.on_progress(&ProgressUpdate::new(0, "native", 0.015, 1, 100));
        observer.on_progress(&ProgressUpdate::new(0, "native", 0.016, 2, 100));
        assert!((observer.gate.last_claimed() - 0.015).abs() < f64::EPSILON);
    }

    #[test]
    fn noop_observer_gate_is_silent() {
        let gate = NoOpObserver::new().freeze();
        assert!(!gate.claim(0.5));
        assert!(!gate.claim(1.0));
    }
}
