use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{debug, info, warn};

use super::{BlockchainMetrics, SlidingWindowAggregator};

/// Drives minute rotation of a [`SlidingWindowAggregator`] from a tokio task
/// and republishes the window gauges after every rotation.
pub struct RotationTicker {
    aggregator: Arc<SlidingWindowAggregator>,
    metrics: BlockchainMetrics,
    interval: Duration,
    recent_minutes: usize,
}

/// Handle to a running ticker
pub struct RotationHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RotationTicker {
    /// `interval` must be non-zero, see [`crate::config::MetricsConfig::validate`]
    pub fn new(
        aggregator: Arc<SlidingWindowAggregator>,
        metrics: BlockchainMetrics,
        interval: Duration,
        recent_minutes: usize,
    ) -> Self {
        Self {
            aggregator,
            metrics,
            interval,
            recent_minutes,
        }
    }

    /// Rotate once and publish the resulting statistics
    pub fn tick(&self) {
        self.aggregator.rotate();
        let stats = self.aggregator.window_stats(self.recent_minutes);
        self.metrics.publish_window(&stats);
        debug!(
            tps_recent_minute = stats.tps_recent_minute,
            tps_recent_hour = stats.tps_recent_hour,
            "published execution window"
        );
    }

    /// Spawn the ticker on the current runtime. The first rotation happens
    /// one full interval after the call.
    pub fn spawn(self) -> RotationHandle {
        let (shutdown, mut shutdown_rx) = watch::channel(false);
        let task = tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
            // A late tick must not be replayed as a burst of rotations
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            info!(interval = ?self.interval, "execution window rotation started");

            loop {
                tokio::select! {
                    _ = ticker.tick() => self.tick(),
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() {
                            warn!("rotation handle dropped without shutdown");
                        }
                        break;
                    }
                }
            }

            info!("execution window rotation stopped");
        });

        RotationHandle { shutdown, task }
    }
}

impl RotationHandle {
    /// Stop the ticker and wait for its task to finish
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        if let Err(e) = self.task.await {
            warn!(error = %e, "rotation task did not stop cleanly");
        }
    }

    /// Whether the ticker task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}
