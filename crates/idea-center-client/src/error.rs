// crates/idea-center-client/src/error.rs
// ============================================================================
// Module: Client Errors
// Description: Error taxonomy for credential bootstrap and API transport.
// Purpose: Keep failures typed and carry the raw server body for diagnosis.
// Dependencies: thiserror
// ============================================================================

//! ## Overview
//! [`ClientError`] covers every failure the client can surface, from unusable
//! configuration through rejected logins to undecodable response bodies.

use thiserror::Error;

/// Idea Center client errors.
///
/// # Invariants
/// - `body` payloads hold the raw response text exactly as received.
/// - No variant ever carries a bearer token or password.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Client or credential configuration is unusable.
    #[error("client config error: {0}")]
    Config(String),
    /// The request could not be sent or the response could not be read.
    #[error("transport error: {0}")]
    Transport(String),
    /// The authentication endpoint answered with a non-success status.
    #[error("failed to authenticate: status {status}, body: {body}")]
    Authentication {
        /// HTTP status code returned by the authentication endpoint.
        status: u16,
        /// Raw response body.
        body: String,
    },
    /// The authentication response did not contain a usable `accessToken`.
    #[error("failed to retrieve access token: {0}")]
    MissingToken(String),
    /// A response body could not be decoded into the expected shape.
    #[error("invalid response payload: {detail}; body: {body}")]
    Decode {
        /// Decoder error message.
        detail: String,
        /// Raw response body.
        body: String,
    },
}
