//! Request lifecycle hooks
//!
//! Host frameworks call [`Lifecycle::run`] at each stage of a request. The
//! console registers plain callbacks here instead of wrapping the host's own
//! request handling.
//!
//! ```
//! use page_console::{ConsoleConfig, Lifecycle, RequestScope, Stage};
//! use std::sync::Arc;
//!
//! let lifecycle = Lifecycle::with_console_defaults();
//! let mut scope = RequestScope::new(Arc::new(ConsoleConfig::default()), "development");
//!
//! lifecycle.run(Stage::BeforeRequest, &mut scope);
//! scope.console().info("handled");
//! assert!(scope.render_statements().is_some());
//! lifecycle.run(Stage::AfterRequest, &mut scope);
//! assert!(scope.buffer().is_none());
//! ```

use crate::RequestScope;

/// Point in the request lifecycle a hook runs at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Request scope has been created, handler not yet run
    BeforeRequest,
    /// Response has been rendered
    AfterRequest,
    /// Host discarded the session state of the request
    ResetSession,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BeforeRequest => "before_request",
            Self::AfterRequest => "after_request",
            Self::ResetSession => "reset_session",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Callback registered for a stage
pub type Hook = Box<dyn Fn(&mut RequestScope) + Send + Sync>;

/// Ordered hook registry, built at startup and shared between requests
#[derive(Default)]
pub struct Lifecycle {
    hooks: Vec<(Stage, Hook)>,
}

impl std::fmt::Debug for Lifecycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let stages: Vec<Stage> = self.hooks.iter().map(|(stage, _)| *stage).collect();
        f.debug_struct("Lifecycle").field("hooks", &stages).finish()
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry that drops the console buffer after the request and on session reset
    pub fn with_console_defaults() -> Self {
        let mut lifecycle = Self::new();
        lifecycle.register(Stage::AfterRequest, RequestScope::reset_session);
        lifecycle.register(Stage::ResetSession, RequestScope::reset_session);
        lifecycle
    }

    pub fn register<F>(&mut self, stage: Stage, hook: F) -> &mut Self
    where
        F: Fn(&mut RequestScope) + Send + Sync + 'static,
    {
        self.hooks.push((stage, Box::new(hook)));
        self
    }

    /// Number of hooks registered for `stage`
    pub fn count(&self, stage: Stage) -> usize {
        self.hooks.iter().filter(|(s, _)| *s == stage).count()
    }

    /// Run the hooks of `stage` in registration order
    pub fn run(&self, stage: Stage, scope: &mut RequestScope) {
        tracing::trace!(%stage, hooks = self.count(stage), "running lifecycle hooks");

        for (_, hook) in self.hooks.iter().filter(|(s, _)| *s == stage) {
            hook(scope);
        }
    }
}
