//! Property-based tests for the binary-splitting core.

use proptest::prelude::*;

use chudpi_core::budget::ThreadBudget;
use chudpi_core::sizing::terms_for_digits;
use chudpi_core::split::{
    evaluate_range, evaluate_range_sequential, evaluate_series, evaluate_series_with, SplitPolicy,
};
use chudpi_core::observers::NoOpObserver;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Any split ratio yields the same triple as a left fold over the range.
    #[test]
    fn split_point_invariance(a in 0u64..200, width in 1u64..120, ratio in 0.01f64..0.99) {
        let b = a + width;
        let policy = SplitPolicy::new(ratio, 1000);
        let split = evaluate_range(a, b, ThreadBudget::SEQUENTIAL, &policy);
        let fold = evaluate_range_sequential(a, b);
        prop_assert_eq!(split, fold, "[{}, {}) with ratio {}", a, b, ratio);
    }

    /// The thread budget never changes the root sum.
    #[test]
    fn deterministic_across_budgets(terms in 0u64..400, threads in 1usize..9) {
        let eager = SplitPolicy::new(0.5224, 0);
        let observer = NoOpObserver::new();
        let reference = evaluate_series(terms, ThreadBudget::SEQUENTIAL);
        let parallel = evaluate_series_with(terms, ThreadBudget::new(threads), &eager, &observer, 0, "prop");
        prop_assert_eq!(parallel, reference, "terms={} threads={}", terms, threads);
    }

    /// More digits never need fewer terms.
    #[test]
    fn term_count_is_monotonic(d in 0u64..10_000_000, extra in 0u64..1_000) {
        prop_assert!(terms_for_digits(d) <= terms_for_digits(d + extra));
    }

    /// Splitting a range anywhere and merging the halves gives the whole.
    #[test]
    fn merge_of_adjacent_ranges(a in 0u64..100, left in 1u64..60, right in 1u64..60) {
        let policy = SplitPolicy::default();
        let m = a + left;
        let b = m + right;
        let merged = evaluate_range(a, m, ThreadBudget::SEQUENTIAL, &policy)
            .merge(evaluate_range(m, b, ThreadBudget::SEQUENTIAL, &policy));
        prop_assert_eq!(merged, evaluate_range(a, b, ThreadBudget::SEQUENTIAL, &policy));
    }
}

#[test]
fn zero_terms_for_every_budget() {
    for threads in [1, 2, 4, 8] {
        let sum = evaluate_series(0, ThreadBudget::new(threads));
        assert_eq!(sum.p.to_string(), "1");
        assert_eq!(sum.q.to_string(), "0");
    }
}
