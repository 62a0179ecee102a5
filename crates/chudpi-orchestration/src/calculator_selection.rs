//! Calculator selection logic.

use std::sync::Arc;

use chudpi_core::calculator::{Calculator, PiError};
use chudpi_core::registry::CalculatorFactory;

/// Get calculators to run based on backend selection.
///
/// `"all"` selects every backend the factory offers.
///
/// # Errors
///
/// Returns `PiError::Config` for an unknown backend name.
pub fn get_calculators_to_run(
    backend: &str,
    factory: &dyn CalculatorFactory,
) -> Result<Vec<Arc<dyn Calculator>>, PiError> {
    match backend {
        "all" => factory
            .available()
            .into_iter()
            .map(|name| factory.get(name))
            .collect(),
        name => Ok(vec![factory.get(name)?]),
    }
}
