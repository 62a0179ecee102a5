//! Core orchestration: timed execution and result analysis.

use std::sync::Arc;
use std::time::Instant;

use tracing::{info, warn};

use chudpi_core::calculator::{Calculator, PiError};
use chudpi_core::observer::ProgressObserver;
use chudpi_core::options::Options;

use crate::interfaces::CalculationResult;

/// Execute calculations with all given calculators and a progress observer.
///
/// Calculators run one after another, each with the full thread budget, so
/// the budget in `opts` is never exceeded.
pub fn execute_calculations(
    calculators: &[Arc<dyn Calculator>],
    digits: u64,
    opts: &Options,
    observer: &dyn ProgressObserver,
) -> Vec<CalculationResult> {
    calculators
        .iter()
        .enumerate()
        .map(|(i, calc)| {
            let start = Instant::now();
            let outcome = calc.calculate(observer, i, digits, opts);
            let duration = start.elapsed();

            match &outcome {
                Ok(_) => info!(algorithm = calc.name(), ?duration, "Calculator finished"),
                Err(e) => warn!(algorithm = calc.name(), error = %e, "Calculator failed"),
            }

            CalculationResult {
                algorithm: calc.name().to_string(),
                outcome,
                duration,
            }
        })
        .collect()
}

/// Analyze comparison results for mismatches.
///
/// # Errors
///
/// Returns `PiError::Calculation` when no calculator succeeded and
/// `PiError::Mismatch` when two successful digit strings differ.
pub fn analyze_comparison_results(results: &[CalculationResult]) -> Result<(), PiError> {
    let mut values = results.iter().filter_map(CalculationResult::value);

    let Some(first) = values.next() else {
        return Err(PiError::Calculation("no valid results".into()));
    };

    // Compare all results to the first valid one
    if values.any(|value| value != first) {
        return Err(PiError::Mismatch);
    }
    Ok(())
}
