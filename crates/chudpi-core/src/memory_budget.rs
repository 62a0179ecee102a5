//! Memory budget estimation and validation.

use crate::constants::P_FACTOR;
use crate::sizing::{terms_for_digits, working_precision_bits};

/// Memory estimate for computing pi to a given number of digits.
#[derive(Debug, Clone)]
pub struct MemoryEstimate {
    /// Estimated size of the root `P` and `Q` integers (in bytes).
    pub series_bytes: usize,
    /// Estimated memory for merge temporaries (in bytes).
    pub temp_bytes: usize,
    /// Estimated memory for the finishing step's floats (in bytes).
    pub finish_bytes: usize,
    /// Total estimated memory (in bytes).
    pub total_bytes: usize,
}

impl MemoryEstimate {
    /// Estimate memory usage for `digits` decimal digits of pi.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn estimate(digits: u64) -> Self {
        let terms = terms_for_digits(digits);
        // P(0,n) = (n!)^3 * P_FACTOR^n; Q has the same order of magnitude.
        let p_bits = 3.0 * log2_factorial(terms) + terms as f64 * (P_FACTOR as f64).log2();
        // Float-to-int casts saturate, so huge digit counts land on usize::MAX.
        let p_bytes = (p_bits / 8.0).ceil() as usize;
        let series_bytes = p_bytes.saturating_mul(2);

        // The root merge holds both halves, G of the left half and the
        // three products at once.
        let temp_bytes = p_bytes.saturating_mul(3);

        // P', Q', the quotient and sqrt(C), all at working precision.
        let precision_bytes =
            usize::try_from(working_precision_bits(digits).div_ceil(8)).unwrap_or(usize::MAX);
        let finish_bytes = precision_bytes.saturating_mul(4);

        Self {
            series_bytes,
            temp_bytes,
            finish_bytes,
            total_bytes: series_bytes
                .saturating_add(temp_bytes)
                .saturating_add(finish_bytes),
        }
    }

    /// Check if the computation fits within the given memory limit.
    ///
    /// `None` means unlimited (always fits).
    #[must_use]
    pub fn fits_in(&self, limit: Option<usize>) -> bool {
        match limit {
            None => true,
            Some(l) => self.total_bytes <= l,
        }
    }
}

/// `log2(n!)` by Stirling's approximation; exact enough for sizing.
#[allow(clippy::cast_precision_loss)]
fn log2_factorial(n: u64) -> f64 {
    if n < 2 {
        return 0.0;
    }
    let n = n as f64;
    n * n.log2() - n * std::f64::consts::LOG2_E + 0.5 * (std::f64::consts::TAU * n).log2()
}

/// Parse a memory limit string (e.g., "8G", "512M", "1024K").
///
/// # Errors
///
/// Returns an error string if the format is invalid or the number cannot be parsed.
pub fn parse_memory_limit(s: &str) -> Result<usize, String> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(0);
    }

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('G') {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1024 * 1024)
    } else if let Some(n) = s.strip_suffix('K') {
        (n, 1024)
    } else if let Some(n) = s.strip_suffix('B') {
        (n, 1)
    } else {
        (s, 1)
    };

    let value: usize = num_str
        .trim()
        .parse()
        .map_err(|e| format!("invalid memory limit: {e}"))?;
    value
        .checked_mul(multiplier)
        .ok_or_else(|| format!("memory limit too large: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn estimate_small() {
        let est = MemoryEstimate::estimate(100);
        assert!(est.series_bytes > 0);
        assert!(est.finish_bytes > 0);
        assert!(est.total_bytes > est.series_bytes);
    }

    #[test]
    fn estimate_below_one_term() {
        let est = MemoryEstimate::estimate(10);
        assert_eq!(est.series_bytes, 0);
        assert_eq!(est.total_bytes, est.finish_bytes);
    }

    #[test]
    fn estimate_million_digits() {
        // P(0, 70513) is a few million bits; pi itself is ~415KB.
        let est = MemoryEstimate::estimate(1_000_000);
        assert!(est.finish_bytes > 1_600_000);
        assert!(est.series_bytes > est.finish_bytes);
        assert!(est.total_bytes < 64 * 1024 * 1024);
    }

    #[test]
    fn estimate_grows_with_digits() {
        let small = MemoryEstimate::estimate(1_000);
        let large = MemoryEstimate::estimate(100_000);
        assert!(large.total_bytes > small.total_bytes * 50);
    }

    #[test]
    fn fits_in_unlimited() {
        let est = MemoryEstimate::estimate(100_000_000);
        assert!(est.fits_in(None));
        assert!(!est.fits_in(Some(1024)));
    }

    #[test]
    fn estimate_saturates_for_huge_digit_counts() {
        let est = MemoryEstimate::estimate(u64::MAX);
        assert_eq!(est.total_bytes, usize::MAX);
        assert!(!est.fits_in(Some(1 << 30)));
        assert!(est.fits_in(None));
    }

    #[test]
    fn stirling_is_close() {
        // log2(10!) = log2(3628800) ~ 21.79
        assert!((log2_factorial(10) - 21.791).abs() < 0.05);
        assert!(log2_factorial(1).abs() < f64::EPSILON);
    }

    #[test]
    fn parse_memory_limit_values() {
        assert_eq!(parse_memory_limit("8G").unwrap(), 8 * 1024 * 1024 * 1024);
        assert_eq!(parse_memory_limit("512M").unwrap(), 512 * 1024 * 1024);
        assert_eq!(parse_memory_limit("1024K").unwrap(), 1024 * 1024);
        assert_eq!(parse_memory_limit("64B").unwrap(), 64);
        assert_eq!(parse_memory_limit("").unwrap(), 0);
    }

    #[test]
    fn parse_memory_limit_invalid() {
        assert!(parse_memory_limit("abc").is_err());
        assert!(parse_memory_limit("12T").is_err());
    }
}
