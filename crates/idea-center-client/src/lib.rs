// crates/idea-center-client/src/lib.rs
// ============================================================================
// Module: Idea Center Client
// Description: Authenticated blocking HTTP session for the Idea Center API.
// Purpose: Provide credential bootstrap, session transport, and typed endpoints.
// Dependencies: reqwest, serde, serde_json, thiserror, tracing, url
// ============================================================================

//! ## Overview
//! This crate owns everything the suite needs to talk to a remote Idea Center
//! API: resolving a bearer credential (configured token or login), opening a
//! single authenticated [`Session`], and issuing the idea endpoint calls.
//! Invariants:
//! - A [`Session`] always carries a non-empty [`BearerToken`].
//! - Response bodies are kept verbatim so decode failures can show them.
//! - Tokens and passwords never appear in `Debug` output or logs.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod api;
pub mod credential;
pub mod error;
pub mod session;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use api::ApiMessage;
pub use api::IdeaApi;
pub use api::IdeaId;
pub use api::IdeaPayload;
pub use api::IdeaRecord;
pub use credential::BearerToken;
pub use credential::CredentialSource;
pub use credential::LoginCredentials;
pub use credential::resolve_token;
pub use error::ClientError;
pub use reqwest::StatusCode;
pub use session::ApiResponse;
pub use session::Exchange;
pub use session::Session;
pub use session::SessionOptions;
