use crate::{ConfigError, Severity};
use serde::Deserialize;
use std::collections::BTreeSet;

/// Environment variable holding the default buffer severity
pub const LEVEL_VAR: &str = "PAGE_CONSOLE_LEVEL";

/// Environment variable holding a comma-separated list of allowed environments
pub const ENVIRONMENTS_VAR: &str = "PAGE_CONSOLE_ENVIRONMENTS";

/// Variables consulted, in order, for the current deployment environment
const ENVIRONMENT_NAME_VARS: [&str; 2] = ["APP_ENV", "RUST_ENV"];

const DEFAULT_ENVIRONMENT: &str = "development";

/// Process-wide console configuration
///
/// Built once at startup and shared behind an `Arc`. There is no way to
/// mutate it once requests are being served.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    /// Initial level of every new buffer (default: DEBUG)
    pub default_severity: Severity,
    /// Environments in which messages are captured at all (default: development)
    pub allowed_environments: BTreeSet<String>,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            default_severity: Severity::Debug,
            allowed_environments: BTreeSet::from([DEFAULT_ENVIRONMENT.to_string()]),
        }
    }
}

impl ConsoleConfig {
    pub fn with_default_severity(mut self, severity: Severity) -> Self {
        self.default_severity = severity;
        self
    }

    /// Replace the allowed environment set
    pub fn with_allowed_environments<I, S>(mut self, environments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allowed_environments = environments.into_iter().map(Into::into).collect();
        self
    }

    /// Add one environment to the allowed set
    pub fn allow_environment(mut self, environment: impl Into<String>) -> Self {
        self.allowed_environments.insert(environment.into());
        self
    }

    pub fn is_environment_allowed(&self, environment: &str) -> bool {
        self.allowed_environments.contains(environment)
    }

    /// Parse a JSON document; missing fields keep their defaults
    ///
    /// ```
    /// use page_console::{ConsoleConfig, Severity};
    ///
    /// let config = ConsoleConfig::from_json(r#"{"default_severity": "warn"}"#).unwrap();
    /// assert_eq!(config.default_severity, Severity::Warn);
    /// assert!(config.is_environment_allowed("development"));
    /// ```
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        tracing::debug!(
            default_severity = %config.default_severity,
            environments = ?config.allowed_environments,
            "loaded console config from json"
        );
        Ok(config)
    }

    /// Load from `PAGE_CONSOLE_LEVEL` and `PAGE_CONSOLE_ENVIRONMENTS`
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_vars(|name| std::env::var(name).ok())
    }

    /// Load using a custom variable lookup; unset variables keep their defaults
    pub fn from_env_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level) = lookup(LEVEL_VAR) {
            config.default_severity =
                level
                    .parse::<Severity>()
                    .map_err(|err| ConfigError::InvalidEnvVar {
                        var: LEVEL_VAR,
                        source: Box::new(err),
                    })?;
        }

        if let Some(environments) = lookup(ENVIRONMENTS_VAR) {
            config.allowed_environments = environments
                .split(',')
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect();
        }

        tracing::debug!(
            default_severity = %config.default_severity,
            environments = ?config.allowed_environments,
            "loaded console config from environment"
        );

        Ok(config)
    }
}

/// Name of the current deployment environment
///
/// Reads `APP_ENV`, then `RUST_ENV`, and falls back to `development`.
pub fn current_environment() -> String {
    current_environment_from(|name| std::env::var(name).ok())
}

/// [`current_environment`] with a custom variable lookup; empty values are skipped
pub fn current_environment_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ENVIRONMENT_NAME_VARS
        .iter()
        .find_map(|&name| lookup(name).filter(|value| !value.is_empty()))
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string())
}
