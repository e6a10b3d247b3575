use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use tracing_subscriber::EnvFilter;

use crate::{Error, Result};

/// Install a global fmt subscriber filtered by `filter` (e.g. `"info"` or
/// `"frost_exec_metrics=debug"`). `RUST_LOG` takes precedence when set.
pub fn init_logging(filter: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(filter))
        .map_err(|e| Error::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .try_init()
        .map_err(|e| Error::Logging(e.to_string()))
}

/// Install the Prometheus recorder as the global `metrics` recorder.
///
/// Must run before [`crate::metrics::BlockchainMetrics::new`], handles
/// registered earlier stay detached. The returned handle renders the scrape
/// body.
pub fn install_prometheus_recorder() -> Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    tracing::info!("prometheus recorder installed");
    Ok(handle)
}
