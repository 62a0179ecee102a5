//! Progress update type sent from the binary-splitting phase to observers.

/// Progress update sent from calculators to observers.
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Calculator index (for multi-backend runs).
    pub calc_index: usize,
    /// Name of the backend producing this update.
    pub algorithm: &'static str,
    /// Current progress as a fraction in [0.0, 1.0].
    pub progress: f64,
    /// Series terms whose base cases have been evaluated.
    pub current_step: u64,
    /// Total number of series terms.
    pub total_steps: u64,
    /// Whether this is the final update.
    pub done: bool,
}

impl ProgressUpdate {
    /// Create a new progress update.
    #[must_use]
    pub fn new(
        calc_index: usize,
        algorithm: &'static str,
        progress: f64,
        current: u64,
        total: u64,
    ) -> Self {
        Self {
            calc_index,
            algorithm,
            progress,
            current_step: current,
            total_steps: total,
            done: false,
        }
    }

    /// Create a completion update.
    #[must_use]
    pub fn done(calc_index: usize, algorithm: &'static str) -> Self {
        Self {
            calc_index,
            algorithm,
            progress: 1.0,
            current_step: 0,
            total_steps: 0,
            done: true,
        }
    }

    /// Fraction of `total` covered by `current`, 1.0 for an empty series.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(current: u64, total: u64) -> f64 {
        if total == 0 {
            1.0
        } else {
            (current as f64 / total as f64).min(1.0)
        }
    }
}
