use crate::ConfigError;
use serde::{Deserialize, Serialize};

/// Severity of a buffered console message
///
/// Ordered from least to most severe. `Unknown` sorts above every other tier,
/// so a buffer at any level still accepts it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warn,
    #[serde(alias = "fatal")]
    Error,
    Unknown,
}

impl Severity {
    /// Fatal messages share the error tier for filtering and emission.
    pub const FATAL: Severity = Severity::Error;

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "DEBUG",
            Self::Info => "INFO",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Browser console function used to emit a message of this severity
    pub fn console_function(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Unknown => "log",
        }
    }
}

impl Default for Severity {
    fn default() -> Self {
        Self::Debug
    }
}

impl std::str::FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "fatal" => Ok(Self::Error),
            "unknown" => Ok(Self::Unknown),
            _ => Err(ConfigError::InvalidSeverity {
                value: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
