//! Precision conversion: from the exact root `(P, Q)` to pi.
//!
//! ```text
//! pi = (P * C/D) / (Q + A*P) * sqrt(C)
//! ```
//!
//! `A*P` is the index-0 term of the series, which binary splitting never
//! produces.

use num_bigint::BigInt;
use tracing::debug;

use crate::bigfloat::BigFloat;
use crate::budget::ThreadBudget;
use crate::constants::{A, C, C_OVER_D, MIN_THREADS_FOR_SPLIT};
use crate::sizing::working_precision_bits;
use crate::term::SeriesSum;

/// `(P', Q')` = `(P * C/D, Q + A*P)`, still exact.
#[must_use]
pub fn scale_root(sum: &SeriesSum) -> (BigInt, BigInt) {
    let q = &sum.q + &sum.p * A;
    let p = &sum.p * C_OVER_D;
    (p, q)
}

/// Turn the root sum into pi at the working precision for `digits`.
///
/// With a budget of two or more, the quotient and `sqrt(C)` are computed
/// concurrently.
#[must_use]
pub fn finish(sum: &SeriesSum, digits: u64, budget: ThreadBudget) -> BigFloat {
    let precision = working_precision_bits(digits);
    let (p, q) = scale_root(sum);
    debug!(precision, threads = budget.get(), "Finishing");

    let quotient = || {
        let p = BigFloat::from_integer(&p, precision);
        let q = BigFloat::from_integer(&q, precision);
        &p / &q
    };
    let root = || BigFloat::from_u64(C, precision).sqrt();

    let (quotient, root) = if budget.allows(MIN_THREADS_FOR_SPLIT) {
        rayon::join(quotient, root)
    } else {
        (quotient(), root())
    };
    &quotient * &root
}
