//! Mapping a requested digit count onto series terms and working precision.

use crate::constants::{BITS_PER_DIGIT, DIGITS_PER_TERM, PRECISION_MARGIN_BITS};

/// Number of series terms needed for `digits` decimal digits.
///
/// `floor(digits / 14.18...)`; index 0 is folded into the finishing step,
/// so fewer than 15 digits need no terms at all.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn terms_for_digits(digits: u64) -> u64 {
    (digits as f64 / DIGITS_PER_TERM) as u64
}

/// Working precision in bits for the finishing step.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn working_precision_bits(digits: u64) -> u64 {
    (digits as f64 * BITS_PER_DIGIT + PRECISION_MARGIN_BITS as f64) as u64
}

/// Depth of the binary-splitting tree over `terms`: the smallest `k` with
/// `2^k >= terms`, plus one.
#[must_use]
pub fn recursion_depth(terms: u64) -> u32 {
    let mut depth = 0u32;
    while depth < 64 && (1u64 << depth) < terms {
        depth += 1;
    }
    depth + 1
}

/// Decimal digit count of an integer with `bits` significant bits.
///
/// May overshoot by one, like `mpz_sizeinbase(x, 10)`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn approx_decimal_digits(bits: u64) -> u64 {
    if bits == 0 {
        return 1;
    }
    (bits as f64 * std::f64::consts::LOG10_2).ceil() as u64
}
