#![no_main]

use libfuzzer_sys::fuzz_target;

use chudpi_core::budget::ThreadBudget;
use chudpi_core::split::{evaluate_range, evaluate_range_sequential, SplitPolicy};

fuzz_target!(|data: &[u8]| {
    if data.len() < 5 {
        return;
    }
    // Bytes 0-1: range start, byte 2: width, bytes 3-4: split ratio
    let a = u64::from(u16::from_le_bytes([data[0], data[1]]) % 2_000);
    let b = a + u64::from(data[2] % 128) + 1;
    let ratio = f64::from(u16::from_le_bytes([data[3], data[4]])) / f64::from(u16::MAX);

    let policy = SplitPolicy::new(ratio, 1000);
    let split = evaluate_range(a, b, ThreadBudget::SEQUENTIAL, &policy);
    let fold = evaluate_range_sequential(a, b);
    assert_eq!(split, fold, "[{a}, {b}) with ratio {ratio}");
});
