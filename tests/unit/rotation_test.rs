use frost_exec_metrics::{BlockchainMetrics, RotationTicker, SlidingWindowAggregator};
use std::sync::Arc;
use std::time::Duration;

use crate::common::us;

#[test]
fn test_tick_rotates_once() {
    let aggregator = Arc::new(SlidingWindowAggregator::new());
    aggregator.record_transactions(us(60), 6);

    let ticker = RotationTicker::new(
        Arc::clone(&aggregator),
        BlockchainMetrics::nil(),
        Duration::from_secs(60),
        5,
    );
    ticker.tick();

    assert_eq!(aggregator.rotations(), 1);
    assert_eq!(aggregator.last_closed().map(|s| s.tx_count), Some(6));
}

#[test_log::test(tokio::test(start_paused = true))]
async fn test_spawned_ticker_rotates_every_interval() {
    let aggregator = Arc::new(SlidingWindowAggregator::new());
    let handle = RotationTicker::new(
        Arc::clone(&aggregator),
        BlockchainMetrics::nil(),
        Duration::from_secs(60),
        5,
    )
    .spawn();

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(aggregator.rotations(), 0);

    aggregator.record_transactions(us(10), 1);
    tokio::time::sleep(Duration::from_secs(155)).await;
    assert_eq!(aggregator.rotations(), 3);
    assert_eq!(aggregator.occupancy(), 3);
    assert_eq!(aggregator.running_totals().tx_count, 1);

    handle.shutdown().await;
    tokio::time::sleep(Duration::from_secs(120)).await;
    assert_eq!(aggregator.rotations(), 3);
}

#[tokio::test]
async fn test_shutdown_before_first_tick() {
    let aggregator = Arc::new(SlidingWindowAggregator::new());
    let handle = RotationTicker::new(
        Arc::clone(&aggregator),
        BlockchainMetrics::nil(),
        Duration::from_secs(3600),
        5,
    )
    .spawn();

    assert!(!handle.is_finished());
    handle.shutdown().await;
    assert_eq!(aggregator.rotations(), 0);
}
