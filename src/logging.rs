//! Tracing subscriber setup for binaries and embedders.
//!
//! The library only emits `tracing` events; installing a subscriber is left to
//! the process that hosts it. [`init_tracing`] is the default choice: a
//! formatted stderr subscriber filtered by `RUST_LOG`.

use tracing_subscriber::{EnvFilter, util::SubscriberInitExt, util::TryInitError};

/// Environment variable consulted for filter directives.
pub const LOG_ENV_VAR: &str = "RUST_LOG";

/// Builds a filter from `directives`, falling back to `default` when the
/// directives are absent, blank, or invalid.
#[must_use]
pub fn env_filter(directives: Option<&str>, default: &str) -> EnvFilter {
    directives
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .and_then(|text| EnvFilter::try_new(text).ok())
        .unwrap_or_else(|| EnvFilter::new(default))
}

/// Installs the global formatted subscriber.
///
/// # Errors
///
/// Returns [`TryInitError`] if a global subscriber is already installed.
pub fn init_tracing(default: &str) -> Result<(), TryInitError> {
    let directives = std::env::var(LOG_ENV_VAR).ok();
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(directives.as_deref(), default))
        .with_writer(std::io::stderr)
        .finish()
        .try_init()
}
