//! Golden file integration tests.
//!
//! Verifies computed digits against known values from
//! tests/testdata/pi_golden.json for several thread budgets.

use std::sync::Arc;

use serde::Deserialize;

use chudpi_core::calculator::{Calculator, ChudnovskyCalculator, PiResult};
use chudpi_core::observers::NoOpObserver;
use chudpi_core::options::Options;
use chudpi_core::registry::DefaultFactory;
use chudpi_orchestration::calculator_selection::get_calculators_to_run;
use chudpi_orchestration::orchestrator::{analyze_comparison_results, execute_calculations};

#[derive(Deserialize)]
struct GoldenData {
    values: Vec<GoldenEntry>,
}

#[derive(Deserialize)]
struct GoldenEntry {
    digits: u64,
    value: Option<String>,
    terms: Option<u64>,
    prefix: Option<String>,
    suffix: Option<String>,
}

fn load_golden() -> GoldenData {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/testdata/pi_golden.json");
    let data = std::fs::read_to_string(path).expect("Failed to read golden file");
    serde_json::from_str(&data).expect("Failed to parse golden file")
}

fn compute(calc: &dyn Calculator, digits: u64, threads: usize) -> PiResult {
    let opts = Options {
        threads,
        ..Default::default()
    }
    .normalize();
    calc.calculate(&NoOpObserver::new(), 0, digits, &opts).unwrap()
}

fn check(entry: &GoldenEntry, result: &PiResult, label: &str) {
    let d = entry.digits;
    if let Some(ref expected) = entry.value {
        assert_eq!(&result.value, expected, "{label}: pi({d}) mismatch");
    }
    if let Some(ref prefix) = entry.prefix {
        assert!(result.value.starts_with(prefix.as_str()), "{label}: pi({d}) prefix mismatch");
    }
    if let Some(ref suffix) = entry.suffix {
        assert!(result.value.ends_with(suffix.as_str()), "{label}: pi({d}) suffix mismatch");
    }
    if let Some(terms) = entry.terms {
        assert_eq!(result.terms, terms, "{label}: pi({d}) term count");
    }
    let digit_count = result.value.chars().filter(char::is_ascii_digit).count() as u64;
    assert_eq!(digit_count, d, "{label}: pi({d}) digit count");
}

#[test]
fn golden_single_thread() {
    let golden = load_golden();
    let calc = ChudnovskyCalculator::native();
    for entry in &golden.values {
        let result = compute(&calc, entry.digits, 1);
        check(entry, &result, "1 thread");
    }
}

#[test]
fn golden_thread_budgets() {
    let golden = load_golden();
    let calc = ChudnovskyCalculator::native();
    for threads in [2, 3, 4, 8] {
        for entry in golden.values.iter().filter(|e| e.digits <= 5_000) {
            let result = compute(&calc, entry.digits, threads);
            check(entry, &result, &format!("{threads} threads"));
        }
    }
}

#[test]
fn golden_all_backends_agree() {
    let golden = load_golden();
    let factory = DefaultFactory::new();
    let calculators: Vec<Arc<dyn Calculator>> = get_calculators_to_run("all", &factory).unwrap();
    let opts = Options {
        threads: 2,
        ..Default::default()
    };
    for entry in golden.values.iter().filter(|e| e.digits <= 1_000) {
        let results = execute_calculations(&calculators, entry.digits, &opts, &NoOpObserver::new());
        analyze_comparison_results(&results).unwrap();
        for r in &results {
            check(entry, r.outcome.as_ref().unwrap(), &r.algorithm);
        }
    }
}
