//! # chudpi-core
//!
//! Core library for the chudpi pi calculator.
//! Evaluates the Chudnovsky series by parallel binary splitting over exact
//! integers, then converts the root fraction to pi at a fixed precision.

pub mod bigfloat;
pub mod budget;
pub mod calculator;
pub mod constants;
pub mod finish;
pub mod memory_budget;
pub mod observer;
pub mod observers;
pub mod options;
pub mod progress;
pub mod registry;
pub mod sizing;
pub mod split;
pub mod term;

#[cfg(feature = "gmp")]
pub mod calculator_gmp;

// Re-exports
pub use budget::ThreadBudget;
pub use calculator::{Calculator, ChudnovskyCalculator, Finisher, NativeFinisher, PiError, PiResult};
pub use constants::{exit_codes, PROGRESS_REPORT_THRESHOLD};
pub use observer::ProgressObserver;
pub use options::Options;
pub use progress::ProgressUpdate;
pub use registry::{CalculatorFactory, DefaultFactory};
pub use split::{evaluate_series, SplitPolicy};
pub use term::{SeriesSum, Triple};

/// Compute pi to `digits` significant digits, single-threaded.
///
/// This is a convenience function for simple use cases. For threads,
/// progress or memory limits, use the `Calculator` trait directly.
///
/// # Errors
///
/// Returns `PiError::InvalidInput` when `digits` is zero.
///
/// # Example
/// ```
/// assert_eq!(chudpi_core::pi_digits(10).unwrap(), "3.141592653");
/// assert!(chudpi_core::pi_digits(0).is_err());
/// ```
pub fn pi_digits(digits: u64) -> Result<String, PiError> {
    let observer = observers::NoOpObserver::new();
    ChudnovskyCalculator::native()
        .calculate(&observer, 0, digits, &Options::default())
        .map(|result| result.value)
}
