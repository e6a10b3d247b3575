#![allow(dead_code)]

use frost_exec_metrics::{ExecSummary, SlidingWindowAggregator};
use std::time::Duration;

/// Microsecond duration
pub fn us(micros: u64) -> Duration {
    Duration::from_micros(micros)
}

/// Elementwise sum computed by a full scan of the closed minutes
pub fn scan_totals(aggregator: &SlidingWindowAggregator) -> ExecSummary {
    aggregator
        .closed_slots()
        .iter()
        .fold(ExecSummary::default(), |mut acc, slot| {
            acc.block_count = acc.block_count.wrapping_add(slot.block_count);
            acc.block_period_sum = acc.block_period_sum.wrapping_add(slot.block_period_sum);
            acc.tx_count = acc.tx_count.wrapping_add(slot.tx_count);
            acc.tx_period_sum = acc.tx_period_sum.wrapping_add(slot.tx_period_sum);
            acc
        })
}

/// Close `minutes` minutes, the i-th (1-based) holding `i` transactions
pub fn fill_minutes(aggregator: &SlidingWindowAggregator, minutes: u64) {
    for i in 1..=minutes {
        aggregator.record_transactions(us(i * 10), i);
        aggregator.rotate();
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {}, got {}",
        expected,
        actual
    );
}
