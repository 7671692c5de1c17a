use thiserror::Error;

/// Error raised while loading console configuration
///
/// Buffering and rendering never fail; only configuration input can be invalid.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Severity name did not match any known tier
    #[error("invalid severity '{value}'")]
    InvalidSeverity { value: String },

    /// Environment variable held a value that could not be used
    #[error("invalid value for {var}: {source}")]
    InvalidEnvVar {
        var: &'static str,
        #[source]
        source: Box<ConfigError>,
    },

    /// JSON configuration document could not be parsed
    #[error("invalid configuration document: {0}")]
    Json(#[from] serde_json::Error),
}
