//! Orchestration interfaces.

use std::time::Duration;

use chudpi_core::calculator::{PiError, PiResult};
use chudpi_core::progress::ProgressUpdate;

/// Trait for reporting progress to the user.
pub trait ProgressReporter: Send + Sync {
    /// Report a progress update.
    fn report(&self, update: &ProgressUpdate);

    /// Report completion.
    fn complete(&self);
}

/// Trait for presenting results to the user.
pub trait ResultPresenter: Send + Sync {
    /// Present a successful calculation.
    fn present_result(&self, algorithm: &str, result: &PiResult, duration: Duration, details: bool);

    /// Present a comparison of several backends.
    fn present_comparison(&self, results: &[CalculationResult]);

    /// Present an error.
    fn present_error(&self, error: &str);
}

/// Result of a single calculation.
#[derive(Debug, Clone)]
pub struct CalculationResult {
    /// Calculator name.
    pub algorithm: String,
    /// The computed digits or a structured error.
    pub outcome: Result<PiResult, PiError>,
    /// Total wall time, sizing and pool setup included.
    pub duration: Duration,
}

impl CalculationResult {
    /// The digit string, if the calculation succeeded.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.outcome.as_ref().ok().map(|r| r.value.as_str())
    }
}
