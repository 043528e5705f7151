// crates/idea-center-suite/src/config/mod.rs
// ============================================================================
// Module: Suite Configuration
// Description: TOML file plus environment overrides for a suite run.
// Purpose: Provide strict, fail-closed configuration with typed access.
// Dependencies: idea-center-client, serde, toml, url
// ============================================================================

//! ## Overview
//! Configuration is read from an optional TOML file and then overridden by
//! `IDEA_CENTER_*` environment variables. Every value is validated before a
//! run starts; invalid input fails closed.
//!
//! File resolution order:
//! 1. the explicit path (from `--config`), which must exist;
//! 2. `IDEA_CENTER_CONFIG`, which must exist;
//! 3. `idea-center.toml` in the working directory, if present;
//! 4. built-in defaults.

// ============================================================================
// SECTION: Modules
// ============================================================================

mod env;


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use idea_center_client::ClientError;
use idea_center_client::CredentialSource;
use idea_center_client::SessionOptions;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

// ============================================================================
// SECTION: Re-exports
// ============================================================================

pub use env::SuiteEnv;
pub use env::parse_timeout_seconds;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Address of the public Idea Center training deployment.
pub const DEFAULT_BASE_URL: &str =
    "http://softuni-qa-loadbalancer-2137572849.eu-north-1.elb.amazonaws.com:84";
/// Config filename picked up from the working directory.
pub const DEFAULT_CONFIG_NAME: &str = "idea-center.toml";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    /// Human-readable multi-line output.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

impl LogFormat {
    /// Parses `pretty` or `json` (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] for any other value.
    pub fn parse(raw: &str) -> Result<Self, ConfigError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Invalid(format!(
                "unknown log format '{other}', expected 'pretty' or 'json'"
            ))),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Credential settings; at most one source is used per run.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct AuthConfig {
    /// Pre-issued bearer token.
    pub token: Option<String>,
    /// Login email.
    pub email: Option<String>,
    /// Login password.
    pub password: Option<String>,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("email", &self.email)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Validated configuration for one suite run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuiteConfig {
    /// API base address.
    pub base_url: Url,
    /// Credential settings.
    pub auth: AuthConfig,
    /// Optional request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// Optional artifact directory override.
    pub run_root: Option<PathBuf>,
    /// Logging settings.
    pub log: LogConfig,
}

impl SuiteConfig {
    /// Builds a config for a base URL with everything else defaulted.
    #[must_use]
    pub fn for_base_url(base_url: Url) -> Self {
        Self {
            base_url,
            auth: AuthConfig::default(),
            timeout: None,
            run_root: None,
            log: LogConfig::default(),
        }
    }

    /// Loads configuration from file and environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the file cannot be read or parsed, or when
    /// any value fails validation.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let raw = match resolve_path(path)? {
            Some(resolved) => read_config_file(&resolved)?,
            None => RawConfig::default(),
        };
        let raw = raw.with_env_overrides()?;
        raw.validate()
    }

    /// Selects the credential source for this run.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when no usable credential is configured.
    pub fn credential_source(&self) -> Result<CredentialSource, ClientError> {
        CredentialSource::from_parts(
            self.auth.token.as_deref(),
            self.auth.email.as_deref(),
            self.auth.password.as_deref(),
        )
    }

    /// Returns transport options for the session.
    #[must_use]
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions::new(self.base_url.clone()).with_timeout(self.timeout)
    }
}

// ============================================================================
// SECTION: File Model
// ============================================================================

/// Unvalidated file contents, before env overrides.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    /// API base address.
    base_url: Option<String>,
    /// Request timeout in seconds.
    timeout_sec: Option<u64>,
    /// Report artifact directory.
    run_root: Option<PathBuf>,
    /// `[auth]` table.
    #[serde(default)]
    auth: RawAuth,
    /// `[log]` table.
    #[serde(default)]
    log: RawLog,
}

/// `[auth]` table.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAuth {
    /// Static bearer token.
    token: Option<String>,
    /// Login email.
    email: Option<String>,
    /// Login password.
    password: Option<String>,
}

/// `[log]` table.
#[derive(Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLog {
    /// Filter directive.
    level: Option<String>,
    /// Output format.
    format: Option<LogFormat>,
}

impl RawConfig {
    /// Applies `IDEA_CENTER_*` overrides on top of file values.
    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(value) = read_env(SuiteEnv::BaseUrl)? {
            self.base_url = Some(value);
        }
        if let Some(value) = read_env(SuiteEnv::Token)? {
            self.auth.token = Some(value);
        }
        if let Some(value) = read_env(SuiteEnv::Email)? {
            self.auth.email = Some(value);
        }
        if let Some(value) = read_env(SuiteEnv::Password)? {
            self.auth.password = Some(value);
        }
        if let Some(value) = read_env(SuiteEnv::TimeoutSeconds)? {
            let timeout = parse_timeout_seconds(SuiteEnv::TimeoutSeconds.as_str(), &value)
                .map_err(ConfigError::Invalid)?;
            self.timeout_sec = Some(timeout.as_secs());
        }
        if let Some(value) = read_env(SuiteEnv::RunRoot)? {
            self.run_root = Some(PathBuf::from(value));
        }
        if let Some(value) = read_env(SuiteEnv::LogFormat)? {
            self.log.format = Some(LogFormat::parse(&value)?);
        }
        Ok(self)
    }

    /// Validates and converts into a [`SuiteConfig`].
    fn validate(self) -> Result<SuiteConfig, ConfigError> {
        let base_url = parse_base_url(self.base_url.as_deref().unwrap_or(DEFAULT_BASE_URL))?;
        let timeout = match self.timeout_sec {
            Some(0) => {
                return Err(ConfigError::Invalid("timeout_sec must be greater than zero".into()));
            }
            Some(secs) => Some(Duration::from_secs(secs)),
            None => None,
        };
        let auth = AuthConfig {
            token: non_blank(self.auth.token),
            email: non_blank(self.auth.email),
            password: self.auth.password.filter(|value| !value.is_empty()),
        };
        if auth.email.is_some() != auth.password.is_some() {
            return Err(ConfigError::Invalid(
                "auth email and password must be provided together".to_string(),
            ));
        }
        let level = non_blank(self.log.level).unwrap_or_else(|| LogConfig::default().level);
        Ok(SuiteConfig {
            base_url,
            auth,
            timeout,
            run_root: self.run_root,
            log: LogConfig {
                level,
                format: self.log.format.unwrap_or_default(),
            },
        })
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from the caller, the environment, or the default.
fn resolve_path(path: Option<&Path>) -> Result<Option<PathBuf>, ConfigError> {
    if let Some(path) = path {
        return Ok(Some(path.to_path_buf()));
    }
    if let Some(env_path) = read_env(SuiteEnv::ConfigPath)? {
        return Ok(Some(PathBuf::from(env_path)));
    }
    let default_path = PathBuf::from(DEFAULT_CONFIG_NAME);
    Ok(default_path.is_file().then_some(default_path))
}

/// Reads and parses a config file with size and encoding limits.
fn read_config_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let bytes = fs::read(path)
        .map_err(|err| ConfigError::Io(format!("{}: {err}", path.display())))?;
    if bytes.len() > MAX_CONFIG_FILE_SIZE {
        return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
    toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))
}

/// Reads one suite env key, mapping failures to [`ConfigError::Invalid`].
fn read_env(key: SuiteEnv) -> Result<Option<String>, ConfigError> {
    key.read().map_err(ConfigError::Invalid)
}

/// Parses an http(s) origin URL without credentials, path, query, or fragment.
fn parse_base_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|err| ConfigError::Invalid(format!("invalid base_url '{raw}': {err}")))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::Invalid("base_url must use http or https".to_string()));
    }
    if !url.username().is_empty() || url.password().is_some() {
        return Err(ConfigError::Invalid("base_url must not embed credentials".to_string()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(ConfigError::Invalid("base_url must not have a query or fragment".to_string()));
    }
    // Endpoint paths are absolute and replace any path prefix on join.
    if url.path() != "/" {
        return Err(ConfigError::Invalid(format!(
            "base_url must not have a path, got '{}'",
            url.path()
        )));
    }
    Ok(url)
}

/// Drops empty or whitespace-only strings.
fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}
