pub mod config;
pub mod metrics;
pub mod telemetry;

// Re-exports
pub use config::MetricsConfig;
pub use crate::metrics::{
    BlockchainMetrics,
    ExecSummary,
    RotationHandle,
    RotationTicker,
    SlidingWindowAggregator,
    WindowStats,
};

// Core types
pub type Result<T> = std::result::Result<T, Error>;
pub use error::Error;

pub mod error;
