//! Calculation options and configuration.

use std::num::NonZeroUsize;

use crate::constants::SPLIT_RATIO;
use crate::split::SplitPolicy;

/// Options for a pi calculation.
#[derive(Debug, Clone)]
pub struct Options {
    /// Thread budget (0 = all available cores).
    pub threads: usize,
    /// Split ratio and parallel fan-out threshold.
    pub split: SplitPolicy,
    /// Memory limit in bytes (0 = unlimited).
    pub memory_limit: usize,
    /// Whether to show verbose output.
    pub verbose: bool,
    /// Whether to show detailed output.
    pub details: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            threads: 1,
            split: SplitPolicy::default(),
            memory_limit: 0,
            verbose: false,
            details: false,
        }
    }
}

impl Options {
    /// Normalize options: resolve `threads == 0` to the available
    /// parallelism and replace a split ratio outside `(0, 1)` with the default.
    #[must_use]
    pub fn normalize(mut self) -> Self {
        if self.threads == 0 {
            self.threads = std::thread::available_parallelism().map_or(1, NonZeroUsize::get);
        }
        if !(self.split.ratio > 0.0 && self.split.ratio < 1.0) {
            self.split.ratio = SPLIT_RATIO;
        }
        self
    }

    /// The memory limit as an `Option`, `None` meaning unlimited.
    #[must_use]
    pub fn memory_limit(&self) -> Option<usize> {
        (self.memory_limit > 0).then_some(self.memory_limit)
    }
}
