// crates/idea-center-suite/src/logging.rs
// ============================================================================
// Module: Logging
// Description: Global tracing subscriber setup for the suite binary.
// Purpose: Emit structured run logs to stderr in pretty or JSON form.
// Dependencies: tracing-subscriber
// ============================================================================

//! Tracing subscriber installation for the `idea-center-suite` binary.

use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::LogConfig;
use crate::config::LogFormat;

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level. Logs go to stderr so
/// the per-case report on stdout stays clean. Call once per process.
///
/// # Errors
///
/// Returns a message when the filter is invalid or a subscriber is already set.
pub fn init_tracing(config: &LogConfig) -> Result<(), String> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)
            .map_err(|err| format!("invalid log level '{}': {err}", config.level))?,
    };
    let registry = tracing_subscriber::registry().with(env_filter);
    match config.format {
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
            .map_err(|err| format!("failed to initialize JSON tracing subscriber: {err}")),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .try_init()
            .map_err(|err| format!("failed to initialize pretty tracing subscriber: {err}")),
    }
}
