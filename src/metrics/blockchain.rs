use metrics::{register_counter, register_gauge, Counter, Gauge, Label};
use std::time::Duration;

use super::{MetricsUtils, WindowStats};

/// Subsystem segment of every blockchain metric name
pub const SUBSYSTEM: &str = "blockchain";

/// Blockchain gauges and counters published by a node.
///
/// Built against whichever `metrics` recorder is installed at construction
/// time. [`BlockchainMetrics::nil`] produces handles that discard every
/// update, for nodes running with metrics disabled.
#[derive(Clone)]
pub struct BlockchainMetrics {
    /// TPS of recent minute
    pub tps_recent_minute: Gauge,
    /// TPS of recent hour
    pub tps_recent_hour: Gauge,
    /// Average block execution period (us) in the recent lookback
    pub avg_block_period_recent: Gauge,
    /// Average block execution period (us) in recent hour
    pub avg_block_period_recent_hour: Gauge,
    /// Average transaction execution period (us) in the recent lookback
    pub avg_tx_period_recent: Gauge,
    /// Average transaction execution period (us) in recent hour
    pub avg_tx_period_recent_hour: Gauge,
    /// Height of blockchain
    pub block_height: Gauge,
    /// Last block execution period (ms)
    pub block_period: Gauge,
    /// TPS of database
    pub tps_db: Gauge,
    /// Time usage of DB persisting blocks (ms)
    pub db_period: Gauge,
    /// Occurred forks
    pub forks: Counter,
    /// Error messages occurred
    pub error_messages: Counter,
}

impl BlockchainMetrics {
    /// Register the blockchain metrics under `namespace`, attaching `labels`
    /// to every handle
    pub fn new(namespace: &str, labels: &[(String, String)]) -> Self {
        let labels: Vec<Label> = labels
            .iter()
            .map(|(key, value)| Label::new(key.clone(), value.clone()))
            .collect();
        let gauge = |name: &str| register_gauge!(metric_name(namespace, name), labels.clone());
        let counter = |name: &str| register_counter!(metric_name(namespace, name), labels.clone());

        Self {
            tps_recent_minute: gauge("tps_recent_minute"),
            tps_recent_hour: gauge("tps_recent_hour"),
            avg_block_period_recent: gauge("avrg_block_period_recent_5_min"),
            avg_block_period_recent_hour: gauge("avrg_block_period_recent_hour"),
            avg_tx_period_recent: gauge("avrg_tx_period_recent_5_min"),
            avg_tx_period_recent_hour: gauge("avrg_tx_period_recent_hour"),
            block_height: gauge("block_height"),
            block_period: gauge("block_period"),
            tps_db: gauge("tps_db"),
            db_period: gauge("db_period"),
            forks: counter("forks"),
            error_messages: counter("error_messages"),
        }
    }

    /// Non-operational metrics
    pub fn nil() -> Self {
        Self {
            tps_recent_minute: Gauge::noop(),
            tps_recent_hour: Gauge::noop(),
            avg_block_period_recent: Gauge::noop(),
            avg_block_period_recent_hour: Gauge::noop(),
            avg_tx_period_recent: Gauge::noop(),
            avg_tx_period_recent_hour: Gauge::noop(),
            block_height: Gauge::noop(),
            block_period: Gauge::noop(),
            tps_db: Gauge::noop(),
            db_period: Gauge::noop(),
            forks: Counter::noop(),
            error_messages: Counter::noop(),
        }
    }

    /// Set the six window gauges from a stats snapshot
    pub fn publish_window(&self, stats: &WindowStats) {
        self.tps_recent_minute.set(stats.tps_recent_minute);
        self.tps_recent_hour.set(stats.tps_recent_hour);
        self.avg_block_period_recent.set(stats.avg_block_period_recent_n);
        self.avg_block_period_recent_hour.set(stats.avg_block_period_recent_hour);
        self.avg_tx_period_recent.set(stats.avg_tx_period_recent_n);
        self.avg_tx_period_recent_hour.set(stats.avg_tx_period_recent_hour);
    }

    /// Record the height and execution period of the latest block
    pub fn observe_block(&self, height: u64, period: Duration) {
        self.block_height.set(height as f64);
        self.block_period.set(MetricsUtils::duration_to_ms(period));
    }

    /// Record database throughput and persistence time
    pub fn observe_db(&self, tps: f64, period: Duration) {
        self.tps_db.set(tps);
        self.db_period.set(MetricsUtils::duration_to_ms(period));
    }

    pub fn record_fork(&self) {
        self.forks.increment(1);
    }

    pub fn record_error(&self) {
        self.error_messages.increment(1);
    }
}

/// Full metric name, `<namespace>_blockchain_<name>`
pub fn metric_name(namespace: &str, name: &str) -> String {
    format!("{}_{}_{}", namespace, SUBSYSTEM, name)
}
