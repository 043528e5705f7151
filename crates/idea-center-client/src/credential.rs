// crates/idea-center-client/src/credential.rs
// ============================================================================
// Module: Credentials
// Description: Bearer token resolution for the Idea Center API.
// Purpose: Use a configured token when present, otherwise log in once.
// Dependencies: reqwest, serde, serde_json, tracing
// ============================================================================

//! ## Overview
//! A run needs exactly one bearer token. A configured, non-empty static token
//! is used as-is without touching the network; otherwise the authentication
//! endpoint is called once with the configured email/password pair.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::StatusCode;
use serde::Serialize;
use serde_json::Value;
use tracing::debug;
use tracing::info;

use crate::api::AUTHENTICATION_PATH;
use crate::error::ClientError;
use crate::session::SessionOptions;
use crate::session::build_http_client;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Non-empty opaque bearer credential.
///
/// # Invariants
/// - The wrapped value is never empty or whitespace-only.
#[derive(Clone, PartialEq, Eq)]
pub struct BearerToken(String);

impl BearerToken {
    /// Wraps a raw token string.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::MissingToken`] when the value is empty or whitespace.
    pub fn new(raw: impl Into<String>) -> Result<Self, ClientError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(ClientError::MissingToken("token is empty".to_string()));
        }
        Ok(Self(raw))
    }

    /// Returns the raw token for transport headers.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

/// Email/password pair for the authentication endpoint.
#[derive(Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    /// Account email.
    pub email: String,
    /// Account password.
    pub password: String,
}

impl std::fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Where the run's bearer token comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CredentialSource {
    /// Pre-issued token; no login call is made.
    StaticToken(BearerToken),
    /// Log in once with an email/password pair.
    Login(LoginCredentials),
}

impl CredentialSource {
    /// Picks the credential source from optional configuration values.
    ///
    /// A non-empty token always wins. Otherwise both email and password must be
    /// present.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when neither a token nor a complete
    /// email/password pair is available.
    pub fn from_parts(
        token: Option<&str>,
        email: Option<&str>,
        password: Option<&str>,
    ) -> Result<Self, ClientError> {
        if let Some(token) = token.filter(|value| !value.trim().is_empty()) {
            return Ok(Self::StaticToken(BearerToken::new(token)?));
        }
        match (email, password) {
            (Some(email), Some(password)) if !email.trim().is_empty() => {
                Ok(Self::Login(LoginCredentials {
                    email: email.to_string(),
                    password: password.to_string(),
                }))
            }
            _ => Err(ClientError::Config(
                "no credential configured: set a bearer token or an email/password pair"
                    .to_string(),
            )),
        }
    }
}

/// Authentication request body.
#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct AuthenticationRequest<'a> {
    /// Account email.
    email: &'a str,
    /// Account password.
    password: &'a str,
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the bearer token for a run.
///
/// Static tokens are returned without any network traffic. Login issues exactly
/// one request through a temporary, unauthenticated client.
///
/// # Errors
///
/// Returns [`ClientError`] when the login request fails, the endpoint answers
/// with a non-200 status, or the response lacks a non-empty `accessToken`.
pub fn resolve_token(
    source: &CredentialSource,
    options: &SessionOptions,
) -> Result<BearerToken, ClientError> {
    match source {
        CredentialSource::StaticToken(token) => {
            debug!("using configured bearer token");
            Ok(token.clone())
        }
        CredentialSource::Login(credentials) => login(credentials, options),
    }
}

/// Calls the authentication endpoint and extracts `accessToken`.
fn login(
    credentials: &LoginCredentials,
    options: &SessionOptions,
) -> Result<BearerToken, ClientError> {
    let client = build_http_client(options, None)?;
    let url = options
        .base_url
        .join(AUTHENTICATION_PATH)
        .map_err(|err| ClientError::Config(format!("invalid authentication url: {err}")))?;
    info!(email = %credentials.email, "requesting access token");
    let response = client
        .post(url)
        .json(&AuthenticationRequest {
            email: &credentials.email,
            password: &credentials.password,
        })
        .send()
        .map_err(|err| ClientError::Transport(format!("authentication request failed: {err}")))?;
    let status = response.status();
    let body = response
        .text()
        .map_err(|err| ClientError::Transport(format!("authentication body unreadable: {err}")))?;
    if status != StatusCode::OK {
        return Err(ClientError::Authentication {
            status: status.as_u16(),
            body,
        });
    }
    extract_access_token(&body)
}

/// Reads a non-empty `accessToken` string from an authentication response body.
pub(crate) fn extract_access_token(body: &str) -> Result<BearerToken, ClientError> {
    let payload: Value = serde_json::from_str(body).map_err(|err| ClientError::Decode {
        detail: format!("authentication response is not json: {err}"),
        body: body.to_string(),
    })?;
    let token = payload
        .get("accessToken")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::MissingToken("accessToken field missing".to_string()))?;
    BearerToken::new(token)
}
