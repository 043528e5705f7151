// crates/idea-center-suite/src/config/env.rs
// ============================================================================
// Module: Suite Environment
// Description: Environment keys and strict parsing for suite configuration.
// Purpose: Centralize env parsing with strict UTF-8 validation.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Environment values are parsed with strict UTF-8 enforcement to avoid silent
//! misconfiguration. Invalid UTF-8 and empty values fail closed.

use std::time::Duration;

// ============================================================================
// SECTION: Environment Constants
// ============================================================================

/// Environment keys for suite configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SuiteEnv {
    /// Optional config file path.
    ConfigPath,
    /// API base URL override.
    BaseUrl,
    /// Static bearer token; skips login when set.
    Token,
    /// Login email.
    Email,
    /// Login password.
    Password,
    /// Request timeout in seconds (positive integer).
    TimeoutSeconds,
    /// Report artifact directory.
    RunRoot,
    /// Log output format (`pretty` or `json`).
    LogFormat,
}

impl SuiteEnv {
    /// Every key, in documentation order.
    pub const ALL: [Self; 8] = [
        Self::ConfigPath,
        Self::BaseUrl,
        Self::Token,
        Self::Email,
        Self::Password,
        Self::TimeoutSeconds,
        Self::RunRoot,
        Self::LogFormat,
    ];

    /// Returns the canonical environment variable name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ConfigPath => "IDEA_CENTER_CONFIG",
            Self::BaseUrl => "IDEA_CENTER_BASE_URL",
            Self::Token => "IDEA_CENTER_TOKEN",
            Self::Email => "IDEA_CENTER_EMAIL",
            Self::Password => "IDEA_CENTER_PASSWORD",
            Self::TimeoutSeconds => "IDEA_CENTER_TIMEOUT_SEC",
            Self::RunRoot => "IDEA_CENTER_RUN_ROOT",
            Self::LogFormat => "IDEA_CENTER_LOG_FORMAT",
        }
    }

    /// Reads this key, rejecting invalid UTF-8 and empty values.
    ///
    /// # Errors
    ///
    /// Returns an error message naming the variable.
    pub fn read(self) -> Result<Option<String>, String> {
        read_env_nonempty(self.as_str())
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reads an environment variable and enforces UTF-8 validity.
///
/// # Errors
///
/// Returns an error when the environment variable contains invalid UTF-8.
fn read_env_strict(name: &str) -> Result<Option<String>, String> {
    std::env::var_os(name).map_or(Ok(None), |raw| {
        raw.into_string().map(Some).map_err(|_| format!("{name} must be valid UTF-8"))
    })
}

/// Reads an environment variable and rejects empty values.
fn read_env_nonempty(name: &str) -> Result<Option<String>, String> {
    match read_env_strict(name)? {
        Some(value) if value.trim().is_empty() => Err(format!("{name} must not be empty")),
        Some(value) => Ok(Some(value)),
        None => Ok(None),
    }
}

/// Parses a positive number of seconds.
///
/// # Errors
///
/// Returns an error when the value is empty, non-numeric, or zero.
pub fn parse_timeout_seconds(name: &str, raw: &str) -> Result<Duration, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("{name} must be a positive integer number of seconds"));
    }
    let secs: u64 = trimmed
        .parse()
        .map_err(|_| format!("{name} must be a positive integer number of seconds"))?;
    if secs == 0 {
        return Err(format!("{name} must be greater than zero"));
    }
    Ok(Duration::from_secs(secs))
}
