//! Calculator traits and the `ChudnovskyCalculator`.
//!
//! `Calculator` is the public trait consumed by orchestration.
//! `Finisher` is the internal seam between the exact series and a float
//! backend. `ChudnovskyCalculator` owns sizing, the memory check, the thread
//! pool and progress reporting, and hands the root sum to its finisher.

use std::sync::Arc;
use std::time::{Duration, Instant};

use rayon::ThreadPoolBuilder;
use serde::Serialize;
use tracing::{debug, info};

use crate::budget::ThreadBudget;
use crate::finish::finish;
use crate::memory_budget::MemoryEstimate;
use crate::observer::ProgressObserver;
use crate::options::Options;
use crate::progress::ProgressUpdate;
use crate::sizing::{approx_decimal_digits, recursion_depth, terms_for_digits, working_precision_bits};
use crate::split::evaluate_series_with;
use crate::term::SeriesSum;

/// Error type for pi calculations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PiError {
    /// The requested input cannot be computed.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),

    /// A calculation error occurred.
    #[error("calculation error: {0}")]
    Calculation(String),

    /// Results from different backends don't match.
    #[error("result mismatch between backends")]
    Mismatch,
}

/// A finished computation of pi.
#[derive(Debug, Clone, Serialize)]
pub struct PiResult {
    /// Requested number of significant digits.
    pub digits: u64,
    /// Pi truncated to `digits` significant digits, e.g. `"3.1415"`.
    pub value: String,
    /// Number of series terms evaluated.
    pub terms: u64,
    /// Depth of the binary-splitting tree.
    pub depth: u32,
    /// Working precision of the finishing step in bits.
    pub precision_bits: u64,
    /// Thread budget the computation ran with.
    pub threads: usize,
    /// Approximate decimal size of the root `P`.
    pub p_digits: u64,
    /// Approximate decimal size of the root `Q`.
    pub q_digits: u64,
    /// Wall time of the binary splitting.
    pub series_time: Duration,
    /// Wall time of the finishing step.
    pub finish_time: Duration,
}

/// Public trait for pi calculators, consumed by orchestration.
pub trait Calculator: Send + Sync {
    /// Calculate pi to `digits` significant digits.
    fn calculate(
        &self,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        digits: u64,
        opts: &Options,
    ) -> Result<PiResult, PiError>;

    /// Get the name of this calculator.
    fn name(&self) -> &str;
}

/// Internal trait for the float backend of the finishing step.
pub trait Finisher: Send + Sync {
    /// Turn the root sum into pi, rendered with `digits` significant digits.
    fn finish_digits(
        &self,
        sum: &SeriesSum,
        digits: u64,
        budget: ThreadBudget,
    ) -> Result<String, PiError>;

    /// Get the name of this backend.
    fn name(&self) -> &'static str;
}

/// Finishing step on the crate's own `BigFloat`.
#[derive(Debug, Default)]
pub struct NativeFinisher;

impl NativeFinisher {
    /// Create a new native finisher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Finisher for NativeFinisher {
    fn finish_digits(
        &self,
        sum: &SeriesSum,
        digits: u64,
        budget: ThreadBudget,
    ) -> Result<String, PiError> {
        let significant = usize::try_from(digits)
            .map_err(|_| PiError::InvalidInput(format!("{digits} digits do not fit in memory")))?;
        Ok(finish(sum, digits, budget).to_decimal_string(significant))
    }

    fn name(&self) -> &'static str {
        "Chudnovsky"
    }
}

/// Binary splitting on a dedicated rayon pool, then a `Finisher`.
pub struct ChudnovskyCalculator {
    finisher: Arc<dyn Finisher>,
}

impl ChudnovskyCalculator {
    /// Create a calculator around the given finisher.
    #[must_use]
    pub fn new(finisher: Arc<dyn Finisher>) -> Self {
        Self { finisher }
    }

    /// Calculator using the native `BigFloat` finisher.
    #[must_use]
    pub fn native() -> Self {
        Self::new(Arc::new(NativeFinisher::new()))
    }
}

impl Calculator for ChudnovskyCalculator {
    fn calculate(
        &self,
        observer: &dyn ProgressObserver,
        calc_index: usize,
        digits: u64,
        opts: &Options,
    ) -> Result<PiResult, PiError> {
        if digits == 0 {
            return Err(PiError::InvalidInput(
                "digit count must be at least 1".into(),
            ));
        }

        let opts = opts.clone().normalize();
        let estimate = MemoryEstimate::estimate(digits);
        if !estimate.fits_in(opts.memory_limit()) {
            return Err(PiError::Config(format!(
                "estimated memory {} bytes exceeds limit of {} bytes",
                estimate.total_bytes, opts.memory_limit
            )));
        }

        let algorithm = self.finisher.name();
        let terms = terms_for_digits(digits);
        let precision_bits = working_precision_bits(digits);
        let depth = recursion_depth(terms);
        let budget = ThreadBudget::new(opts.threads);
        debug!(
            algorithm,
            digits,
            terms,
            depth,
            precision_bits,
            threads = opts.threads,
            estimated_bytes = estimate.total_bytes,
            "Starting calculation"
        );

        let pool = ThreadPoolBuilder::new()
            .num_threads(opts.threads)
            .thread_name(|i| format!("chudpi-{i}"))
            .build()
            .map_err(|e| PiError::Calculation(format!("failed to create thread pool: {e}")))?;

        let start = Instant::now();
        let sum = pool.install(|| {
            evaluate_series_with(terms, budget, &opts.split, observer, calc_index, algorithm)
        });
        let series_time = start.elapsed();
        let p_digits = approx_decimal_digits(sum.p.bits());
        let q_digits = approx_decimal_digits(sum.q.bits());
        debug!(?series_time, p_digits, q_digits, "Binary splitting done");

        let start = Instant::now();
        let value = pool.install(|| self.finisher.finish_digits(&sum, digits, budget))?;
        let finish_time = start.elapsed();
        observer.on_progress(&ProgressUpdate::done(calc_index, algorithm));

        info!(
            algorithm,
            digits,
            ?series_time,
            ?finish_time,
            "Calculation complete"
        );

        Ok(PiResult {
            digits,
            value,
            terms,
            depth,
            precision_bits,
            threads: opts.threads,
            p_digits,
            q_digits,
            series_time,
            finish_time,
        })
    }

    fn name(&self) -> &str {
        self.finisher.name()
    }
}
