use crate::emitter::{self, ScriptEmbed};
use crate::{ConsoleConfig, LogBuffer};
use std::sync::Arc;

/// Per-request storage slot for the console buffer
///
/// The buffer is created on first access through [`RequestScope::console`]
/// and dropped by [`RequestScope::reset_session`] or when the scope itself
/// goes away with the request.
#[derive(Debug, Clone)]
pub struct RequestScope {
    config: Arc<ConsoleConfig>,
    environment: Arc<str>,
    buffer: Option<LogBuffer>,
}

impl RequestScope {
    pub fn new(config: Arc<ConsoleConfig>, environment: impl Into<Arc<str>>) -> Self {
        Self {
            config,
            environment: environment.into(),
            buffer: None,
        }
    }

    pub fn config(&self) -> &ConsoleConfig {
        &self.config
    }

    /// Deployment environment this request runs in
    pub fn environment(&self) -> &str {
        &self.environment
    }

    /// The request's buffer, created on first use
    pub fn console(&mut self) -> &mut LogBuffer {
        let config = &self.config;
        let environment = &self.environment;
        self.buffer
            .get_or_insert_with(|| LogBuffer::new(Arc::clone(config), environment))
    }

    /// The buffer if one was created; never creates it
    pub fn buffer(&self) -> Option<&LogBuffer> {
        self.buffer.as_ref()
    }

    /// Discard the buffer and everything in it
    pub fn reset_session(&mut self) {
        if let Some(buffer) = self.buffer.take() {
            tracing::trace!(discarded = buffer.len(), "console buffer discarded");
        }
    }

    pub fn render_statements(&self) -> Option<String> {
        emitter::render_statements(self.buffer())
    }

    pub fn render_script<E>(&self, embed: &E) -> Option<String>
    where
        E: ScriptEmbed + ?Sized,
    {
        emitter::render_script(self.buffer(), embed)
    }
}
