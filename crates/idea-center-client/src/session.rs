// crates/idea-center-client/src/session.rs
// ============================================================================
// Module: Session
// Description: Single authenticated HTTP session bound to one base URL.
// Purpose: Send API requests with the bearer credential and keep a transcript.
// Dependencies: reqwest, serde, serde_json, tracing, url
// ============================================================================

//! ## Overview
//! A [`Session`] wraps one blocking reqwest client whose default headers carry
//! the bearer token, so every request issued through it is authenticated. Each
//! exchange is appended to an in-memory transcript that the caller receives on
//! [`Session::close`].
//! Invariants:
//! - Requests after `close` fail with [`ClientError::Transport`].
//! - The transcript never contains request headers.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Mutex;
use std::time::Duration;

use reqwest::Method;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::blocking::RequestBuilder;
use reqwest::header::AUTHORIZATION;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use tracing::info;
use url::Url;

use crate::credential::BearerToken;
use crate::error::ClientError;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// User agent sent on every request.
pub const DEFAULT_USER_AGENT: &str = concat!("idea-center-suite/", env!("CARGO_PKG_VERSION"));

// ============================================================================
// SECTION: Options
// ============================================================================

/// Transport options shared by the login client and the session client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionOptions {
    /// API base address, for example `http://host:84`.
    pub base_url: Url,
    /// Optional whole-request timeout; `None` keeps the transport default.
    pub timeout: Option<Duration>,
    /// User agent header value.
    pub user_agent: String,
}

impl SessionOptions {
    /// Creates options for a base URL with default timeout and user agent.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Overrides the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Builds a blocking client, attaching the bearer header when a token is given.
pub(crate) fn build_http_client(
    options: &SessionOptions,
    token: Option<&BearerToken>,
) -> Result<Client, ClientError> {
    let mut builder = Client::builder().user_agent(options.user_agent.clone());
    if let Some(timeout) = options.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(token) = token {
        let mut value = HeaderValue::from_str(&format!("Bearer {}", token.as_str()))
            .map_err(|_| ClientError::Config("bearer token is not a valid header".to_string()))?;
        value.set_sensitive(true);
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, value);
        builder = builder.default_headers(headers);
    }
    builder.build().map_err(|err| ClientError::Config(format!("failed to build http client: {err}")))
}

// ============================================================================
// SECTION: Responses
// ============================================================================

/// Status and raw body of one API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    /// HTTP status code.
    status: StatusCode,
    /// Raw body text.
    body: String,
}

impl ApiResponse {
    /// Creates a response from its parts.
    #[must_use]
    pub const fn new(status: StatusCode, body: String) -> Self {
        Self {
            status,
            body,
        }
    }

    /// Returns the HTTP status code.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Returns the raw body text.
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Decode`] with the raw body when decoding fails.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, ClientError> {
        serde_json::from_str(&self.body).map_err(|err| ClientError::Decode {
            detail: err.to_string(),
            body: self.body.clone(),
        })
    }
}

/// One recorded request/response exchange.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Exchange {
    /// 1-based position within the session.
    pub sequence: u64,
    /// HTTP method.
    pub method: String,
    /// Request path relative to the base URL.
    pub path: String,
    /// Encoded query string, if any.
    pub query: Option<String>,
    /// Response status, absent when the request failed in transport.
    pub status: Option<u16>,
    /// Raw response body, empty on transport failure.
    pub body: String,
    /// Transport error message, if any.
    pub error: Option<String>,
}

// ============================================================================
// SECTION: Session
// ============================================================================

/// The single authenticated HTTP session of a run.
///
/// # Invariants
/// - `client` is `Some` until [`Session::close`] runs.
/// - `transcript` sequence numbers are strictly increasing.
pub struct Session {
    /// API base address.
    base_url: Url,
    /// Authenticated client; released on close.
    client: Option<Client>,
    /// Recorded exchanges.
    transcript: Mutex<Vec<Exchange>>,
}

impl Session {
    /// Opens a session whose requests all carry `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] when the client cannot be built.
    pub fn open(options: &SessionOptions, token: &BearerToken) -> Result<Self, ClientError> {
        let client = build_http_client(options, Some(token))?;
        info!(base_url = %options.base_url, "session opened");
        Ok(Self {
            base_url: options.base_url.clone(),
            client: Some(client),
            transcript: Mutex::new(Vec::new()),
        })
    }

    /// Returns the API base address.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns a snapshot of the exchanges recorded so far.
    #[must_use]
    pub fn transcript(&self) -> Vec<Exchange> {
        self.transcript.lock().map_or_else(|_| Vec::new(), |entries| entries.clone())
    }

    /// Sends a request with a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the URL is invalid, the session is closed,
    /// or the transport fails.
    pub fn send_json<B: Serialize + ?Sized>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(path, query)?;
        let request = self.client()?.request(method.clone(), url.clone()).json(body);
        self.execute(request, &method, &url)
    }

    /// Sends a request without a body.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] when the URL is invalid, the session is closed,
    /// or the transport fails.
    pub fn send_empty(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<ApiResponse, ClientError> {
        let url = self.endpoint(path, query)?;
        let request = self.client()?.request(method.clone(), url.clone());
        self.execute(request, &method, &url)
    }

    /// Releases the client and returns the full transcript.
    #[must_use]
    pub fn close(mut self) -> Vec<Exchange> {
        self.release("session closed")
    }

    /// Drops the client once and logs the release.
    fn release(&mut self, reason: &'static str) -> Vec<Exchange> {
        if self.client.take().is_some() {
            info!(base_url = %self.base_url, "{reason}");
        }
        self.transcript.lock().map_or_else(|_| Vec::new(), |mut entries| std::mem::take(&mut *entries))
    }

    /// Returns the live client or fails when the session is closed.
    fn client(&self) -> Result<&Client, ClientError> {
        self.client.as_ref().ok_or_else(|| ClientError::Transport("session is closed".to_string()))
    }

    /// Joins a path and query pairs onto the base URL.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ClientError> {
        let mut url = self
            .base_url
            .join(path)
            .map_err(|err| ClientError::Config(format!("invalid endpoint {path}: {err}")))?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    /// Sends a prepared request, reads the body, and records the exchange.
    fn execute(
        &self,
        request: RequestBuilder,
        method: &Method,
        url: &Url,
    ) -> Result<ApiResponse, ClientError> {
        let outcome = request.send().and_then(|response| {
            let status = response.status();
            response.text().map(|body| ApiResponse::new(status, body))
        });
        match outcome {
            Ok(response) => {
                debug!(
                    method = %method,
                    path = url.path(),
                    status = response.status().as_u16(),
                    "api exchange"
                );
                self.record(method, url, Some(response.status().as_u16()), response.body(), None);
                Ok(response)
            }
            Err(err) => {
                let message = format!("{method} {} failed: {err}", url.path());
                self.record(method, url, None, "", Some(message.clone()));
                Err(ClientError::Transport(message))
            }
        }
    }

    /// Appends an exchange to the transcript.
    fn record(
        &self,
        method: &Method,
        url: &Url,
        status: Option<u16>,
        body: &str,
        error: Option<String>,
    ) {
        let Ok(mut guard) = self.transcript.lock() else {
            return;
        };
        let sequence = u64::try_from(guard.len()).unwrap_or(u64::MAX).saturating_add(1);
        guard.push(Exchange {
            sequence,
            method: method.to_string(),
            path: url.path().to_string(),
            query: url.query().map(ToString::to_string),
            status,
            body: body.to_string(),
            error,
        });
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("base_url", &self.base_url.as_str())
            .field("open", &self.client.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for Session {
    fn drop(&mut self) {
        let _ = self.release("session released on drop");
    }
}
