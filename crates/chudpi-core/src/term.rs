//! Chudnovsky series terms and the `(P, Q, G)` triples binary splitting carries.
//!
//! For a single index `b` (the range `[b-1, b)`):
//!
//! ```text
//! g(b-1,b) = (6b-5)(2b-1)(6b-1)
//! p(b-1,b) = b^3 * C^3 / 24
//! q(b-1,b) = (-1)^b * g(b-1,b) * (A + B*b)
//! ```
//!
//! Index 0 is never produced here: its contribution is the `A * P` added
//! in the finishing step.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};

use crate::constants::{A, B, P_FACTOR};

/// Exact `(P, Q, G)` values for a range `[a, b)` of series terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Triple {
    /// Product of the per-term `p` factors. Always positive.
    pub p: BigInt,
    /// Partial numerator of the range sum over denominator `p`.
    pub q: BigInt,
    /// Product of the per-term `g` factors.
    pub g: BigInt,
}

impl Triple {
    /// The triple of an empty range: `(1, 0, 1)`.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            p: BigInt::one(),
            q: BigInt::zero(),
            g: BigInt::one(),
        }
    }

    /// Merge with the triple of the directly following range, sequentially.
    ///
    /// `P = P1*P2`, `Q = Q1*P2 + Q2*G1`, `G = G1*G2`.
    #[must_use]
    pub fn merge(self, right: Triple) -> Triple {
        let q = &self.q * &right.p + &right.q * &self.g;
        Triple {
            p: self.p * right.p,
            q,
            g: self.g * right.g,
        }
    }

    /// Drop `G`, keeping the parts the finishing step consumes.
    #[must_use]
    pub fn into_sum(self) -> SeriesSum {
        SeriesSum {
            p: self.p,
            q: self.q,
        }
    }
}

/// Root result of the series: `P` and `Q` for `[0, terms)`, without `G`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSum {
    /// Product of all `p` factors.
    pub p: BigInt,
    /// Accumulated numerator over `p`.
    pub q: BigInt,
}

impl SeriesSum {
    /// The zero-term sum: `P = 1`, `Q = 0`.
    #[must_use]
    pub fn identity() -> Self {
        Triple::identity().into_sum()
    }
}

/// Compute the base-case triple for the single term `[b-1, b)`.
///
/// `b` must be at least 1.
#[must_use]
pub fn term(b: u64) -> Triple {
    debug_assert!(b >= 1, "series terms start at index 1");

    let g = BigInt::from(6 * b - 5) * (2 * b - 1) * (6 * b - 1);

    let bb = BigInt::from(b);
    let p = &bb * b * b * P_FACTOR;

    let mut q = (bb * B + A) * &g;
    if b.is_odd() {
        q = -q;
    }

    Triple { p, q, g }
}
