//! Fixed-precision binary floating point on top of `num-bigint`.
//!
//! A `BigFloat` is `mantissa * 2^exponent` with the mantissa truncated to at
//! most `precision` bits after every operation. Truncation rounds toward
//! negative infinity, so for positive operands every result is a lower
//! bound of the exact value.

use std::fmt;
use std::ops::{Div, Mul};

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{Signed, ToPrimitive, Zero};

use crate::constants::BITS_PER_DIGIT;

/// Arbitrary-precision float with a fixed working precision in bits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BigFloat {
    mantissa: BigInt,
    exponent: i64,
    precision: u64,
}

impl BigFloat {
    /// Build `mantissa * 2^exponent`, truncated to `precision` bits.
    #[must_use]
    pub fn new(mantissa: BigInt, exponent: i64, precision: u64) -> Self {
        let mut value = Self {
            mantissa,
            exponent,
            precision: precision.max(1),
        };
        value.normalize();
        value
    }

    /// Convert an exact integer.
    #[must_use]
    pub fn from_integer(value: &BigInt, precision: u64) -> Self {
        Self::new(value.clone(), 0, precision)
    }

    /// Convert a machine integer.
    #[must_use]
    pub fn from_u64(value: u64, precision: u64) -> Self {
        Self::new(BigInt::from(value), 0, precision)
    }

    /// Working precision in bits.
    #[must_use]
    pub fn precision(&self) -> u64 {
        self.precision
    }

    /// The mantissa.
    #[must_use]
    pub fn mantissa(&self) -> &BigInt {
        &self.mantissa
    }

    /// The binary exponent.
    #[must_use]
    pub fn exponent(&self) -> i64 {
        self.exponent
    }

    #[allow(clippy::cast_possible_wrap)]
    fn normalize(&mut self) {
        let bits = self.mantissa.bits();
        if bits > self.precision {
            let excess = bits - self.precision;
            self.mantissa >>= excess;
            self.exponent += excess as i64;
        }
    }

    /// Square root at `self`'s precision.
    ///
    /// # Panics
    ///
    /// Panics if `self` is negative.
    #[must_use]
    #[allow(clippy::cast_possible_wrap)]
    pub fn sqrt(&self) -> BigFloat {
        assert!(
            !self.mantissa.is_negative(),
            "BigFloat square root of a negative value"
        );
        let mut mantissa = self.mantissa.clone();
        let mut exponent = self.exponent;
        if exponent % 2 != 0 {
            mantissa <<= 1u32;
            exponent -= 1;
        }
        // sqrt(m * 2^(2k)) has at least k bits.
        let k = self.precision;
        let root = (mantissa << (2 * k)).sqrt();
        BigFloat::new(root, exponent / 2 - k as i64, self.precision)
    }

    /// `floor(|self|)` as an integer magnitude.
    fn integer_part(magnitude: &BigUint, exponent: i64) -> BigUint {
        if exponent >= 0 {
            magnitude << exponent.unsigned_abs()
        } else {
            magnitude >> exponent.unsigned_abs()
        }
    }

    /// Decimal rendering with `significant` digits in total, truncated.
    ///
    /// The integer part is always printed in full; the fraction fills the
    /// remaining digits, e.g. pi with 5 digits is `"3.1415"`.
    #[must_use]
    pub fn to_decimal_string(&self, significant: usize) -> String {
        let magnitude = self.mantissa.magnitude();
        let int_part = Self::integer_part(magnitude, self.exponent);
        let int_digits = if int_part.is_zero() {
            1
        } else {
            int_part.to_str_radix(10).len()
        };
        let frac_digits = significant.saturating_sub(int_digits);

        let sign = if self.mantissa.sign() == Sign::Minus {
            "-"
        } else {
            ""
        };
        if frac_digits == 0 {
            return format!("{sign}{int_part}");
        }

        let scaled = magnitude * num_traits::pow(BigUint::from(10u32), frac_digits);
        let digits = Self::integer_part(&scaled, self.exponent).to_str_radix(10);
        let digits = format!("{digits:0>width$}", width = frac_digits + 1);
        let (int_str, frac_str) = digits.split_at(digits.len() - frac_digits);
        format!("{sign}{int_str}.{frac_str}")
    }

    /// Nearest `f64`, for diagnostics.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
    pub fn to_f64(&self) -> f64 {
        let bits = self.mantissa.bits();
        let drop = bits.saturating_sub(64);
        let top = (&self.mantissa >> drop).to_f64().unwrap_or(f64::NAN);
        let exponent = (self.exponent + drop as i64).clamp(i64::from(i32::MIN), i64::from(i32::MAX));
        top * 2f64.powi(exponent as i32)
    }
}

/// Quotient at the left operand's precision.
///
/// # Panics
///
/// Panics if `rhs` is zero.
impl Div for &BigFloat {
    type Output = BigFloat;

    #[allow(clippy::cast_possible_wrap)]
    fn div(self, rhs: &BigFloat) -> BigFloat {
        assert!(!rhs.mantissa.is_zero(), "BigFloat division by zero");
        // Pre-shift so the integer quotient carries at least `precision` bits.
        let shift = (self.precision + rhs.mantissa.bits()).saturating_sub(self.mantissa.bits()) + 1;
        let mantissa = (&self.mantissa << shift) / &rhs.mantissa;
        BigFloat::new(
            mantissa,
            self.exponent - rhs.exponent - shift as i64,
            self.precision,
        )
    }
}

/// Product at the left operand's precision.
impl Mul for &BigFloat {
    type Output = BigFloat;

    fn mul(self, rhs: &BigFloat) -> BigFloat {
        BigFloat::new(
            &self.mantissa * &rhs.mantissa,
            self.exponent + rhs.exponent,
            self.precision,
        )
    }
}

impl fmt::Display for BigFloat {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let digits = (self.precision as f64 / BITS_PER_DIGIT).floor() as usize;
        f.write_str(&self.to_decimal_string(digits.max(1)))
    }
}
