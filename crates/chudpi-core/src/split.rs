//! Binary splitting over the Chudnovsky series.
//!
//! A range `[a, b)` is cut at `m` and the halves are merged with
//!
//! ```text
//! P(a,b) = P(a,m) * P(m,b)
//! Q(a,b) = Q(a,m) * P(m,b) + Q(m,b) * G(a,m)
//! G(a,b) = G(a,m) * G(m,b)
//! ```
//!
//! The recursion tree depends only on `(a, b)` and the split policy. The
//! thread budget decides which nodes run their children through
//! `rayon::join`, never which nodes exist, so results are bit-identical for
//! every budget.
//!
//! `G` is elided along the right spine of the tree: the root never needs it,
//! and a node that does not need `G` only needs it from its left child.

use std::sync::atomic::{AtomicU64, Ordering};

use num_bigint::BigInt;
use tracing::debug;

use crate::budget::ThreadBudget;
use crate::constants::{
    MIN_THREADS_FOR_COMBINE, MIN_THREADS_FOR_SPLIT, PARALLEL_RANGE_THRESHOLD, SPLIT_RATIO,
};
use crate::observer::{FrozenObserver, ProgressObserver};
use crate::observers::NoOpObserver;
use crate::progress::ProgressUpdate;
use crate::term::{term, SeriesSum, Triple};

/// Where ranges are cut and how wide they must be before fanning out.
///
/// Neither value affects the result; both only tune speed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPolicy {
    /// Fraction of the range that goes to the left half.
    pub ratio: f64,
    /// Minimum `b - a` before a node may run anything concurrently.
    pub parallel_range_threshold: u64,
}

impl Default for SplitPolicy {
    fn default() -> Self {
        Self {
            ratio: SPLIT_RATIO,
            parallel_range_threshold: PARALLEL_RANGE_THRESHOLD,
        }
    }
}

impl SplitPolicy {
    /// Create a policy with a custom ratio and fan-out threshold.
    #[must_use]
    pub fn new(ratio: f64, parallel_range_threshold: u64) -> Self {
        Self {
            ratio,
            parallel_range_threshold,
        }
    }

    /// Split point `m = a + trunc((b - a) * ratio)`, clamped into `(a, b)`.
    ///
    /// Requires `b - a >= 2`.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn split_point(&self, a: u64, b: u64) -> u64 {
        debug_assert!(b - a >= 2, "cannot split [{a}, {b})");
        let offset = ((b - a) as f64 * self.ratio) as u64;
        a.saturating_add(offset).clamp(a + 1, b - 1)
    }

    fn fans_out(&self, a: u64, b: u64) -> bool {
        b - a >= self.parallel_range_threshold
    }
}

/// Term counter shared by all leaves of one evaluation.
struct SplitProgress<'a> {
    observer: &'a dyn ProgressObserver,
    frozen: FrozenObserver,
    done: AtomicU64,
    total: u64,
    calc_index: usize,
    algorithm: &'static str,
}

impl SplitProgress<'_> {
    fn advance(&self, terms: u64) {
        let done = self.done.fetch_add(terms, Ordering::Relaxed) + terms;
        let progress = ProgressUpdate::fraction(done, self.total);
        self.frozen.report(progress, |progress| {
            self.observer.on_progress(&ProgressUpdate::new(
                self.calc_index,
                self.algorithm,
                progress,
                done,
                self.total,
            ));
        });
    }
}

/// One evaluation: a policy plus the progress sink its leaves report to.
struct Splitter<'a> {
    policy: SplitPolicy,
    progress: SplitProgress<'a>,
}

impl Splitter<'_> {
    /// `(P, Q, G)` for `[a, b)`, `b - a >= 1`.
    fn full(&self, a: u64, b: u64, budget: ThreadBudget) -> Triple {
        let (left, right) = match b - a {
            1 => return self.leaf(b),
            2 => self.pair(b),
            _ => {
                let m = self.policy.split_point(a, b);
                let (t0, t1) = budget.split_pair();
                if self.policy.fans_out(a, b) && budget.allows(MIN_THREADS_FOR_SPLIT) {
                    rayon::join(|| self.full(a, m, t0), || self.full(m, b, t1))
                } else {
                    (self.full(a, m, t0), self.full(m, b, t1))
                }
            }
        };

        let parallel = self.policy.fans_out(a, b) && budget.allows(MIN_THREADS_FOR_COMBINE);
        let (p, q) = combine(&left, &right.p, &right.q, parallel);
        Triple {
            p,
            q,
            g: left.g * right.g,
        }
    }

    /// `(P, Q)` for `[a, b)` without ever forming `G(a, b)`.
    fn root(&self, a: u64, b: u64, budget: ThreadBudget) -> SeriesSum {
        let (left, right) = match b - a {
            1 => return self.leaf(b).into_sum(),
            2 => {
                let (left, right) = self.pair(b);
                (left, right.into_sum())
            }
            _ => {
                let m = self.policy.split_point(a, b);
                let (t0, t1) = budget.split_pair();
                if self.policy.fans_out(a, b) && budget.allows(MIN_THREADS_FOR_SPLIT) {
                    rayon::join(|| self.full(a, m, t0), || self.root(m, b, t1))
                } else {
                    (self.full(a, m, t0), self.root(m, b, t1))
                }
            }
        };

        let parallel = self.policy.fans_out(a, b) && budget.allows(MIN_THREADS_FOR_COMBINE);
        let (p, q) = combine(&left, &right.p, &right.q, parallel);
        SeriesSum { p, q }
    }

    fn leaf(&self, b: u64) -> Triple {
        let t = term(b);
        self.progress.advance(1);
        t
    }

    /// Both single-term triples of `[b-2, b)`, saving one recursion level.
    fn pair(&self, b: u64) -> (Triple, Triple) {
        let pair = (term(b - 1), term(b));
        self.progress.advance(2);
        pair
    }
}

/// The three independent products of a merge, then the sum.
///
/// Two products read `right_p`, but every product writes its own output.
fn combine(left: &Triple, right_p: &BigInt, right_q: &BigInt, parallel: bool) -> (BigInt, BigInt) {
    let (p, (qa, qb)) = if parallel {
        rayon::join(
            || &left.p * right_p,
            || rayon::join(|| &left.q * right_p, || right_q * &left.g),
        )
    } else {
        (&left.p * right_p, (&left.q * right_p, right_q * &left.g))
    };
    (p, qa + qb)
}

/// Evaluate the series over `[0, total_terms)` and return the root `(P, Q)`.
///
/// Parallel sections run on the current rayon pool; `budget` bounds how many
/// of them a node may open. `total_terms == 0` yields `P = 1, Q = 0`.
///
/// # Example
/// ```
/// use chudpi_core::budget::ThreadBudget;
/// use chudpi_core::split::evaluate_series;
///
/// let empty = evaluate_series(0, ThreadBudget::new(4));
/// assert_eq!(empty.p.to_string(), "1");
/// assert_eq!(empty.q.to_string(), "0");
///
/// let seven = evaluate_series(7, ThreadBudget::SEQUENTIAL);
/// assert_eq!(seven, evaluate_series(7, ThreadBudget::new(8)));
/// ```
#[must_use]
pub fn evaluate_series(total_terms: u64, budget: ThreadBudget) -> SeriesSum {
    evaluate_series_with(
        total_terms,
        budget,
        &SplitPolicy::default(),
        &NoOpObserver::new(),
        0,
        "series",
    )
}

/// [`evaluate_series`] with an explicit policy and a progress observer.
#[must_use]
pub fn evaluate_series_with(
    total_terms: u64,
    budget: ThreadBudget,
    policy: &SplitPolicy,
    observer: &dyn ProgressObserver,
    calc_index: usize,
    algorithm: &'static str,
) -> SeriesSum {
    if total_terms == 0 {
        return SeriesSum::identity();
    }

    debug!(
        terms = total_terms,
        threads = budget.get(),
        ratio = policy.ratio,
        "Starting binary splitting"
    );

    let splitter = Splitter {
        policy: *policy,
        progress: SplitProgress {
            observer,
            frozen: observer.freeze(),
            done: AtomicU64::new(0),
            total: total_terms,
            calc_index,
            algorithm,
        },
    };
    splitter.root(0, total_terms, budget)
}

/// Evaluate the full triple, `G` included, for an arbitrary range `[a, b)`.
///
/// An empty range (`a >= b`) yields the identity triple.
#[must_use]
pub fn evaluate_range(a: u64, b: u64, budget: ThreadBudget, policy: &SplitPolicy) -> Triple {
    if a >= b {
        return Triple::identity();
    }
    let observer = NoOpObserver::new();
    let splitter = Splitter {
        policy: *policy,
        progress: SplitProgress {
            observer: &observer,
            frozen: observer.freeze(),
            done: AtomicU64::new(0),
            total: b - a,
            calc_index: 0,
            algorithm: "range",
        },
    };
    splitter.full(a, b, budget)
}

/// Reference evaluation of `[a, b)`: a left fold over single terms, no splitting.
///
/// Quadratic in the range width; meant for cross-checking.
#[must_use]
pub fn evaluate_range_sequential(a: u64, b: u64) -> Triple {
    (a + 1..=b).fold(Triple::identity(), |acc, k| acc.merge(term(k)))
}
