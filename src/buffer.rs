use crate::{ConsoleConfig, Severity};
use serde::Serialize;
use std::sync::Arc;

/// A message accepted by a [`LogBuffer`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
}

/// Per-request, severity-filtered list of console messages
///
/// Messages are kept only when the request's environment is allowed by the
/// configuration and their severity is at least [`LogBuffer::level`].
/// Filtered messages are dropped silently; no operation fails.
///
/// ```
/// use page_console::{ConsoleConfig, LogBuffer, Severity};
/// use std::sync::Arc;
///
/// let mut console = LogBuffer::new(Arc::new(ConsoleConfig::default()), "development");
/// console.set_level(Severity::Info);
/// console.debug("dropped");
/// console.warn("kept");
/// assert_eq!(console.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct LogBuffer {
    config: Arc<ConsoleConfig>,
    enabled: bool,
    level: Severity,
    entries: Vec<LogEntry>,
}

impl LogBuffer {
    pub fn new(config: Arc<ConsoleConfig>, environment: &str) -> Self {
        let enabled = config.is_environment_allowed(environment);
        let level = config.default_severity;

        tracing::trace!(environment, enabled, %level, "console buffer created");

        Self {
            config,
            enabled,
            level,
            entries: Vec::new(),
        }
    }

    /// Whether the environment this buffer was created for captures messages
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn set_level(&mut self, level: Severity) {
        self.level = level;
    }

    /// Accepted entries, oldest first
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every entry. The level is left untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Add a message; a missing severity means UNKNOWN
    ///
    /// Always returns `true`, including when the message is filtered out.
    pub fn add(&mut self, severity: Option<Severity>, message: Option<String>) -> bool {
        self.add_with(severity, message, None::<fn() -> String>)
    }

    /// Add a message, building it lazily when `message` is `None`
    ///
    /// The producer only runs once the message is known to be kept. With
    /// neither a message nor a producer the entry gets an empty message.
    pub fn add_with<F>(
        &mut self,
        severity: Option<Severity>,
        message: Option<String>,
        producer: Option<F>,
    ) -> bool
    where
        F: FnOnce() -> String,
    {
        if !self.enabled {
            return true;
        }

        let severity = severity.unwrap_or(Severity::Unknown);
        if severity < self.level {
            tracing::trace!(%severity, level = %self.level, "console message below buffer level");
            return true;
        }

        let message = match (message, producer) {
            (Some(message), _) => message,
            (None, Some(producer)) => producer(),
            (None, None) => String::new(),
        };

        self.entries.push(LogEntry { severity, message });
        true
    }

    /// Log at the configured default severity
    ///
    /// Uses `ConsoleConfig::default_severity`, not the current buffer level.
    pub fn log(&mut self, message: impl Into<String>) -> bool {
        self.add(Some(self.config.default_severity), Some(message.into()))
    }

    pub fn log_with<F: FnOnce() -> String>(&mut self, producer: F) -> bool {
        self.add_with(Some(self.config.default_severity), None, Some(producer))
    }

    /// Log a DEBUG message
    pub fn debug(&mut self, message: impl Into<String>) -> bool {
        self.add(Some(Severity::Debug), Some(message.into()))
    }

    /// Log a DEBUG message built by `producer` only when it will be kept
    pub fn debug_with<F: FnOnce() -> String>(&mut self, producer: F) -> bool {
        self.add_with(Some(Severity::Debug), None, Some(producer))
    }

    pub fn info(&mut self, message: impl Into<String>) -> bool {
        self.add(Some(Severity::Info), Some(message.into()))
    }

    pub fn info_with<F: FnOnce() -> String>(&mut self, producer: F) -> bool {
        self.add_with(Some(Severity::Info), None, Some(producer))
    }

    pub fn warn(&mut self, message: impl Into<String>) -> bool {
        self.add(Some(Severity::Warn), Some(message.into()))
    }

    pub fn warn_with<F: FnOnce() -> String>(&mut self, producer: F) -> bool {
        self.add_with(Some(Severity::Warn), None, Some(producer))
    }

    pub fn error(&mut self, message: impl Into<String>) -> bool {
        self.add(Some(Severity::Error), Some(message.into()))
    }

    pub fn error_with<F: FnOnce() -> String>(&mut self, producer: F) -> bool {
        self.add_with(Some(Severity::Error), None, Some(producer))
    }

    /// Same tier as [`LogBuffer::error`]
    pub fn fatal(&mut self, message: impl Into<String>) -> bool {
        self.add(Some(Severity::FATAL), Some(message.into()))
    }

    pub fn fatal_with<F: FnOnce() -> String>(&mut self, producer: F) -> bool {
        self.add_with(Some(Severity::FATAL), None, Some(producer))
    }

    /// Log an UNKNOWN message, emitted with `console.log`
    pub fn unknown(&mut self, message: impl Into<String>) -> bool {
        self.add(Some(Severity::Unknown), Some(message.into()))
    }

    pub fn unknown_with<F: FnOnce() -> String>(&mut self, producer: F) -> bool {
        self.add_with(Some(Severity::Unknown), None, Some(producer))
    }

    fn accepts(&self, severity: Severity) -> bool {
        self.level <= severity
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.accepts(Severity::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.accepts(Severity::Info)
    }

    pub fn is_warn_enabled(&self) -> bool {
        self.accepts(Severity::Warn)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.accepts(Severity::Error)
    }

    pub fn is_fatal_enabled(&self) -> bool {
        self.is_error_enabled()
    }
}
