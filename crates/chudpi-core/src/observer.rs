//! Progress observers and the gate the splitting leaves report through.
//!
//! Leaves finish on many rayon workers at once. Each one asks the gate
//! whether its fraction is far enough past the last claimed one; the check
//! is a single atomic load, and only a winning claim takes a lock to
//! notify. Claims and notifications both move forward only.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::progress::ProgressUpdate;

/// Receives progress from a running calculation.
pub trait ProgressObserver: Send + Sync {
    /// Receive a progress update.
    fn on_progress(&self, update: &ProgressUpdate);

    /// The gate a calculation should report through, with this observer's step.
    fn freeze(&self) -> FrozenObserver;
}

/// Monotonic reporting gate shared by concurrent workers.
pub struct FrozenObserver {
    claimed: AtomicU64,
    notified: Mutex<f64>,
    step: f64,
}

impl FrozenObserver {
    /// Gate that lets a fraction through once it is `step` past the last one.
    #[must_use]
    pub fn new(step: f64) -> Self {
        Self {
            claimed: AtomicU64::new(0f64.to_bits()),
            notified: Mutex::new(0.0),
            step,
        }
    }

    /// Gate that never lets anything through.
    #[must_use]
    pub fn silent() -> Self {
        Self::new(f64::INFINITY)
    }

    /// Claim `progress` if it is at least one step past the last claim.
    ///
    /// Exactly one caller wins each claim, and claimed values never decrease.
    #[must_use]
    pub fn claim(&self, progress: f64) -> bool {
        if progress.is_nan() || progress < 0.0 || !self.step.is_finite() {
            return false;
        }
        let mut current = self.claimed.load(Ordering::Acquire);
        loop {
            if progress - f64::from_bits(current) < self.step {
                return false;
            }
            match self.claimed.compare_exchange_weak(
                current,
                progress.to_bits(),
                Ordering::AcqRel,
                Ordering::Acquire,
            ) {
                Ok(_) => return true,
                Err(actual) => current = actual,
            }
        }
    }

    /// Claim `progress` and, if it wins, run `notify` with it.
    ///
    /// Two winning claims can reach the lock in either order; the smaller one
    /// is dropped if the larger was already notified.
    pub fn report(&self, progress: f64, notify: impl FnOnce(f64)) -> bool {
        if !self.claim(progress) {
            return false;
        }
        let mut notified = self.notified.lock();
        if progress < *notified {
            return false;
        }
        *notified = progress;
        notify(progress);
        true
    }

    /// Rearm the gate for the next calculation.
    pub fn reset(&self) {
        let mut notified = self.notified.lock();
        self.claimed.store(0f64.to_bits(), Ordering::Release);
        *notified = 0.0;
    }

    /// The largest fraction claimed so far.
    #[must_use]
    pub fn last_claimed(&self) -> f64 {
        f64::from_bits(self.claimed.load(Ordering::Acquire))
    }
}
