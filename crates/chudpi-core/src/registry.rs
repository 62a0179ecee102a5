//! Calculator factory and registry.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::calculator::{Calculator, ChudnovskyCalculator, PiError};

/// Factory trait for creating calculators.
pub trait CalculatorFactory: Send + Sync {
    /// Get or create a calculator by name.
    fn get(&self, name: &str) -> Result<Arc<dyn Calculator>, PiError>;

    /// List all available calculator names.
    fn available(&self) -> Vec<&str>;
}

/// Default factory with lazy creation and cache.
pub struct DefaultFactory {
    cache: RwLock<HashMap<String, Arc<dyn Calculator>>>,
}

impl DefaultFactory {
    /// Create a new default factory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            cache: RwLock::new(HashMap::new()),
        }
    }

    fn canonical(name: &str) -> &str {
        match name {
            "bigint" => "native",
            other => other,
        }
    }

    fn create_calculator(name: &str) -> Result<Arc<dyn Calculator>, PiError> {
        match name {
            "native" => Ok(Arc::new(ChudnovskyCalculator::native())),
            #[cfg(feature = "gmp")]
            "gmp" => {
                let finisher = Arc::new(crate::calculator_gmp::GmpFinisher::new());
                Ok(Arc::new(ChudnovskyCalculator::new(finisher)))
            }
            _ => Err(PiError::Config(format!("unknown calculator: {name}"))),
        }
    }
}

impl Default for DefaultFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl CalculatorFactory for DefaultFactory {
    fn get(&self, name: &str) -> Result<Arc<dyn Calculator>, PiError> {
        let name = Self::canonical(name);

        // Check cache first
        if let Some(calc) = self.cache.read().get(name) {
            return Ok(Arc::clone(calc));
        }

        // Create and cache
        let calc = Self::create_calculator(name)?;
        self.cache
            .write()
            .insert(name.to_string(), Arc::clone(&calc));
        Ok(calc)
    }

    fn available(&self) -> Vec<&str> {
        let mut names = vec!["native"];
        if cfg!(feature = "gmp") {
            names.push("gmp");
        }
        names
    }
}
