//! Shared curves and assertions for integration tests
//!
//! Curves here are smooth and monotonic like a real sensor response, with
//! shapes chosen to stress different parts of the segment search: long flat
//! stretches, steep ends and plain straight lines.

#![allow(dead_code)]

use adcfit_core::{ReferenceCurve, Table, ThermistorConfig};

/// 12-bit 10k/3950 thermistor on a 10k pull-up
pub fn ntc_12bit() -> ReferenceCurve {
    ThermistorConfig::ntc_10k_3950().reference_curve()
}

/// Straight decreasing line over `len` codes
pub fn linear(len: usize, start: f64, slope: f64) -> ReferenceCurve {
    ReferenceCurve::from_fn(len, |i| start + slope * i as f64)
}

/// Downward parabola `top - k·i²`
pub fn parabola(len: usize, top: f64, k: f64) -> ReferenceCurve {
    ReferenceCurve::from_fn(len, |i| top - k * (i * i) as f64)
}

/// Decreasing logistic step, nearly flat at both ends
pub fn sigmoid(len: usize, high: f64, low: f64) -> ReferenceCurve {
    let mid = len as f64 / 2.0;
    let width = len as f64 / 12.0;
    ReferenceCurve::from_fn(len, |i| {
        low + (high - low) / (1.0 + ((i as f64 - mid) / width).exp())
    })
}

/// Segments cover `[start, end]` contiguously and in order
pub fn assert_coverage(table: &Table, start: usize, end: usize) {
    assert!(!table.is_empty(), "empty table");
    assert_eq!(table.start_index() as usize, start);
    assert_eq!(table.end_index() as usize, end);

    let mut next = start;
    for (segment, stats) in table.iter() {
        assert_eq!(segment.start_index as usize, next, "gap or overlap at {}", next);
        assert!(stats.points >= 1);
        next += stats.points;
    }
    assert_eq!(next, end + 1, "coverage stops at {}", next - 1);
}

/// Every covered code, replayed through the device lookup, is within `bound`
pub fn assert_error_bound(table: &Table, curve: &ReferenceCurve, bound: f64) {
    let lookup = table.lookup();
    for code in table.start_index()..=table.end_index() {
        let expected = curve.values()[code as usize];
        let actual = lookup.lookup_real(code);
        assert!(
            (actual - expected).abs() <= bound,
            "code {}: table {} reference {} bound {}",
            code, actual, expected, bound
        );
    }
    for stats in table.stats() {
        assert!(stats.max_error <= bound);
    }
}
