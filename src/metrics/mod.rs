use std::time::Duration;

pub mod blockchain;
pub mod rotation;
pub mod window;

// Re-export the execution window types
pub use blockchain::BlockchainMetrics;
pub use rotation::{RotationHandle, RotationTicker};
pub use window::{
    ExecSummary,
    SlidingWindowAggregator,
    WindowStats,
    MINUTES_PER_HOUR,
    SECONDS_PER_MINUTE,
};

/// Common metrics collection utilities
pub struct MetricsUtils;

impl MetricsUtils {
    /// Average of `sum` over `count`, 0.0 when nothing was counted
    pub fn safe_average(sum: u64, count: u64) -> f64 {
        if count == 0 {
            0.0
        } else {
            sum as f64 / count as f64
        }
    }

    /// Convert duration to whole microseconds, saturating at `u64::MAX`
    pub fn duration_to_micros(duration: Duration) -> u64 {
        u64::try_from(duration.as_micros()).unwrap_or(u64::MAX)
    }

    /// Convert duration to milliseconds
    pub fn duration_to_ms(duration: Duration) -> f64 {
        duration.as_secs_f64() * 1000.0
    }
}
