//! Server-side messages shown in the browser console
//!
//! Application code logs into a per-request [`LogBuffer`]; at render time the
//! buffer is turned into `console.*` statements embedded in the page, so
//! backend diagnostics show up in the browser developer tools.

mod buffer;
mod config;
mod emitter;
mod error;
mod http;
mod lifecycle;
mod scope;
mod severity;

pub use buffer::{LogBuffer, LogEntry};
pub use config::{
    ConsoleConfig, ENVIRONMENTS_VAR, LEVEL_VAR, current_environment, current_environment_from,
};
pub use emitter::{ScriptEmbed, ScriptTag, escape_message, render_script, render_statements};
pub use error::ConfigError;
pub use http::{inject_into_bytes, inject_script, is_html_content_type};
pub use lifecycle::{Hook, Lifecycle, Stage};
pub use scope::RequestScope;
pub use severity::Severity;

#[cfg(feature = "actix")]
pub use http::{attach_actix, render_actix, reset_actix, with_actix_console};

#[cfg(feature = "hyper")]
pub use http::{attach_hyper, hyper_console, inject_hyper_response};
