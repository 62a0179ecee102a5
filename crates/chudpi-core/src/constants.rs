//! Chudnovsky series constants, tuning thresholds, and exit codes.

/// Linear term offset of the series numerator.
pub const A: u64 = 13_591_409;

/// Linear term slope of the series numerator.
pub const B: u64 = 545_140_134;

/// The Chudnovsky constant (640320). Divisible by both 24 and `D`.
pub const C: u64 = 640_320;

/// Divisor used when scaling the root `P` in the finishing step.
pub const D: u64 = 12;

/// `C / 24`, exact.
pub const C_OVER_24: u64 = C / 24;

/// `(C/24)^2 * (24*C)` = `C^3 / 24`, the constant factor of every `p_k`.
pub const P_FACTOR: u64 = C_OVER_24 * C_OVER_24 * (C * 24);

/// `C / D`, exact.
pub const C_OVER_D: u64 = C / D;

/// Decimal digits gained per series term.
#[allow(clippy::excessive_precision)]
pub const DIGITS_PER_TERM: f64 = 14.181_647_462_725_477_655_5;

/// `log2(10)`.
#[allow(clippy::excessive_precision)]
pub const BITS_PER_DIGIT: f64 = 3.321_928_094_887_362_347_87;

/// Extra bits of working precision on top of `digits * log2(10)`.
pub const PRECISION_MARGIN_BITS: u64 = 16;

/// Default split ratio for `[a, b)`: `m = a + (b - a) * SPLIT_RATIO`.
///
/// Skewed past the midpoint because higher-indexed terms are larger.
pub const SPLIT_RATIO: f64 = 0.5224;

/// Minimum range width (in terms) before any parallel fan-out.
pub const PARALLEL_RANGE_THRESHOLD: u64 = 1000;

/// Minimum thread budget for running both halves of a split concurrently.
pub const MIN_THREADS_FOR_SPLIT: usize = 2;

/// Minimum thread budget for running the three combine products concurrently.
pub const MIN_THREADS_FOR_COMBINE: usize = 3;

/// Minimum progress change (1%) before reporting an update.
pub const PROGRESS_REPORT_THRESHOLD: f64 = 0.01;

/// Process exit codes.
pub mod exit_codes {
    /// Successful execution.
    pub const SUCCESS: i32 = 0;
    /// Generic error.
    pub const ERROR_GENERIC: i32 = 1;
    /// Backends produced different digits.
    pub const ERROR_MISMATCH: i32 = 3;
    /// Invalid configuration.
    pub const ERROR_CONFIG: i32 = 4;
}
