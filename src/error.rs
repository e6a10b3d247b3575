use thiserror::Error;

/// Crate error type.
///
/// The execution window itself never fails; these cover configuration,
/// exporter installation and logging setup.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid metrics configuration
    #[error("Config error: {0}")]
    Config(String),

    /// Configuration could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Metrics exporter could not be installed
    #[error("Exporter error: {0}")]
    Exporter(String),

    /// Logging subscriber could not be installed
    #[error("Logging error: {0}")]
    Logging(String),
}

impl Error {
    /// Check if the error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Config(_) => false,
            Error::Serialization(_) => false,
            Error::Exporter(_) => true,
            Error::Logging(_) => false,
        }
    }
}

impl From<metrics_exporter_prometheus::BuildError> for Error {
    fn from(err: metrics_exporter_prometheus::BuildError) -> Self {
        Error::Exporter(err.to_string())
    }
}
