/*!
# Metrics Configuration

Settings the host uses to wire the execution window into its metrics
pipeline: whether metrics are published at all, the metric namespace and
labels, the lookback used for the "recent" averages and the rotation period.

All fields have defaults, so a partial JSON document is enough:

```rust
use frost_exec_metrics::config::MetricsConfig;

let config = MetricsConfig::from_json(r#"{ "namespace": "node", "recent_minutes": 10 }"#).unwrap();
assert_eq!(config.recent_minutes, 10);
assert!(config.enabled);
```
*/

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::metrics::{BlockchainMetrics, MINUTES_PER_HOUR};
use crate::{Error, Result};

/// Execution metrics configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Publish metrics; when false every handle discards its updates
    pub enabled: bool,
    /// Metric name prefix
    pub namespace: String,
    /// Constant labels attached to every metric
    pub labels: Vec<(String, String)>,
    /// Lookback for the recent averages, in minutes
    pub recent_minutes: usize,
    /// Period between rotations
    pub rotation_interval: Duration,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            namespace: "frost".to_string(),
            labels: Vec::new(),
            recent_minutes: 5,
            rotation_interval: Duration::from_secs(60),
        }
    }
}

impl MetricsConfig {
    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.namespace.is_empty() {
            return Err(Error::Config("namespace must not be empty".into()));
        }
        if !is_metric_prefix(&self.namespace) {
            return Err(Error::Config(format!(
                "namespace {:?} is not a valid metric name prefix",
                self.namespace
            )));
        }
        if self.recent_minutes == 0 || self.recent_minutes > MINUTES_PER_HOUR {
            return Err(Error::Config(format!(
                "recent_minutes must be within 1..={}, got {}",
                MINUTES_PER_HOUR, self.recent_minutes
            )));
        }
        if self.rotation_interval.is_zero() {
            return Err(Error::Config("rotation_interval must be non-zero".into()));
        }
        if self.labels.iter().any(|(key, _)| key.is_empty()) {
            return Err(Error::Config("label keys must not be empty".into()));
        }
        Ok(())
    }

    /// Build the blockchain metrics this configuration describes
    pub fn blockchain_metrics(&self) -> BlockchainMetrics {
        if self.enabled {
            BlockchainMetrics::new(&self.namespace, &self.labels)
        } else {
            BlockchainMetrics::nil()
        }
    }
}

// [a-zA-Z_][a-zA-Z0-9_]*
fn is_metric_prefix(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
