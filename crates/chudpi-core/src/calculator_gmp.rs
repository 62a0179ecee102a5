//! GMP/MPFR finishing step using the `rug` crate.
//!
//! Only available when the `gmp` feature is enabled. The series itself is
//! still evaluated with `num-bigint`; only the float arithmetic moves to MPFR.

use num_bigint::{BigInt, Sign};
use rug::integer::Order;
use rug::{Float, Integer};
use tracing::debug;

use crate::budget::ThreadBudget;
use crate::calculator::{Finisher, PiError};
use crate::constants::{C, MIN_THREADS_FOR_SPLIT};
use crate::finish::scale_root;
use crate::sizing::working_precision_bits;
use crate::term::SeriesSum;

/// Finishing step on `rug::Float`.
#[derive(Debug, Default)]
pub struct GmpFinisher;

impl GmpFinisher {
    /// Create a new GMP finisher.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

fn to_rug(value: &BigInt) -> Integer {
    let (sign, bytes) = value.to_bytes_le();
    let magnitude = Integer::from_digits(&bytes, Order::Lsf);
    if sign == Sign::Minus {
        -magnitude
    } else {
        magnitude
    }
}

/// `floor(value * 10^(digits-1))` rendered as `"3.1415..."`.
fn render(value: &Float, digits: u32, precision: u32) -> Result<String, PiError> {
    let frac = digits.saturating_sub(1);
    let scale = Integer::from(Integer::u_pow_u(10, frac));
    let scaled = Float::with_val(precision, value * &scale).floor();
    let digits_str = scaled
        .to_integer()
        .ok_or_else(|| PiError::Calculation("non-finite result".into()))?
        .to_string();
    if frac == 0 {
        return Ok(digits_str);
    }
    let split = digits_str.len().saturating_sub(frac as usize);
    let (int_part, frac_part) = digits_str.split_at(split);
    Ok(format!("{int_part}.{frac_part}"))
}

impl Finisher for GmpFinisher {
    fn finish_digits(
        &self,
        sum: &SeriesSum,
        digits: u64,
        budget: ThreadBudget,
    ) -> Result<String, PiError> {
        let precision = u32::try_from(working_precision_bits(digits))
            .map_err(|_| PiError::InvalidInput(format!("{digits} digits exceed MPFR precision")))?;
        let significant = u32::try_from(digits)
            .map_err(|_| PiError::InvalidInput(format!("{digits} digits exceed MPFR precision")))?;
        let (p, q) = scale_root(sum);
        debug!(precision, threads = budget.get(), "Finishing with MPFR");

        let quotient = || {
            let p = Float::with_val(precision, &to_rug(&p));
            let q = Float::with_val(precision, &to_rug(&q));
            Float::with_val(precision, &p / &q)
        };
        let root = || Float::with_val(precision, C).sqrt();

        let (quotient, root) = if budget.allows(MIN_THREADS_FOR_SPLIT) {
            rayon::join(quotient, root)
        } else {
            (quotient(), root())
        };
        let pi = Float::with_val(precision, &quotient * &root);
        render(&pi, significant, precision)
    }

    fn name(&self) -> &'static str {
        "Chudnovsky-GMP"
    }
}
