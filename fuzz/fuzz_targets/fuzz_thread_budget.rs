#![no_main]

use libfuzzer_sys::fuzz_target;

use chudpi_core::budget::ThreadBudget;
use chudpi_core::observers::NoOpObserver;
use chudpi_core::split::{evaluate_series, evaluate_series_with, SplitPolicy};

fuzz_target!(|data: &[u8]| {
    if data.len() < 4 {
        return;
    }
    // Bytes 0-1: term count, byte 2: budget, byte 3: fan-out threshold
    let terms = u64::from(u16::from_le_bytes([data[0], data[1]]) % 1_500);
    let threads = usize::from(data[2] % 16) + 1;
    let threshold = u64::from(data[3]);

    let policy = SplitPolicy::new(0.5224, threshold);
    let parallel = evaluate_series_with(
        terms,
        ThreadBudget::new(threads),
        &policy,
        &NoOpObserver::new(),
        0,
        "fuzz",
    );
    let sequential = evaluate_series(terms, ThreadBudget::SEQUENTIAL);
    assert_eq!(parallel, sequential, "terms={terms} threads={threads}");
});
