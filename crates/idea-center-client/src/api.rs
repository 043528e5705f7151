// crates/idea-center-client/src/api.rs
// ============================================================================
// Module: Idea API
// Description: Endpoint paths, DTOs, and typed calls for idea resources.
// Purpose: Keep the remote contract (paths, params, field names) in one place.
// Dependencies: reqwest, serde, serde_json
// ============================================================================

//! ## Overview
//! Request bodies are sent with PascalCase keys. Response fields are accepted
//! in either camelCase or PascalCase so the suite tolerates both serializer
//! conventions on the server side. Idea identifiers may arrive as JSON strings
//! or numbers and are normalized to strings.

// ============================================================================
// SECTION: Imports
// ============================================================================

use reqwest::Method;
use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde::de::Error as _;
use serde_json::Number;

use crate::error::ClientError;
use crate::session::ApiResponse;
use crate::session::Session;

// ============================================================================
// SECTION: Endpoints
// ============================================================================

/// Login endpoint.
pub const AUTHENTICATION_PATH: &str = "/api/User/Authentication";
/// Create endpoint.
pub const CREATE_IDEA_PATH: &str = "/api/Idea/Create";
/// Listing endpoint.
pub const LIST_IDEAS_PATH: &str = "/api/Idea/All";
/// Edit endpoint; takes [`IDEA_ID_PARAM`].
pub const EDIT_IDEA_PATH: &str = "/api/Idea/Edit";
/// Delete endpoint; takes [`IDEA_ID_PARAM`].
pub const DELETE_IDEA_PATH: &str = "/api/Idea/Delete";
/// Query parameter naming the target idea.
pub const IDEA_ID_PARAM: &str = "ideaId";

// ============================================================================
// SECTION: DTOs
// ============================================================================

/// Idea create/edit request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct IdeaPayload {
    /// Idea title; the server requires it non-empty.
    pub title: String,
    /// Idea description; the server requires it non-empty.
    pub description: String,
    /// Optional link, sent as an empty string when unused.
    pub url: String,
}

impl IdeaPayload {
    /// Builds a payload with an empty `url`.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            url: String::new(),
        }
    }
}

/// Remote idea identifier, normalized to its string form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct IdeaId(String);

impl IdeaId {
    /// Wraps an identifier string.
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Returns the identifier as sent in the `ideaId` query parameter.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IdeaId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Wire forms accepted for an identifier.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawIdeaId {
    /// GUID or other textual id.
    Text(String),
    /// Numeric id.
    Number(Number),
}

impl<'de> Deserialize<'de> for IdeaId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match RawIdeaId::deserialize(deserializer)? {
            RawIdeaId::Text(text) if text.trim().is_empty() => {
                Err(D::Error::custom("idea id must not be empty"))
            }
            RawIdeaId::Text(text) => Ok(Self(text)),
            RawIdeaId::Number(number) => Ok(Self(number.to_string())),
        }
    }
}

/// One record of the listing response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaRecord {
    /// Record identifier.
    #[serde(alias = "Id")]
    pub id: IdeaId,
    /// Title, if the server includes it.
    #[serde(default, alias = "Title", skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Description, if the server includes it.
    #[serde(default, alias = "Description", skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Link, if the server includes it.
    #[serde(default, alias = "Url", skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Message envelope returned by create and edit.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiMessage {
    /// Human-readable outcome message.
    #[serde(default, alias = "Msg")]
    pub msg: Option<String>,
}

// ============================================================================
// SECTION: Calls
// ============================================================================

/// Typed idea endpoint calls over a borrowed [`Session`].
///
/// Calls return the raw [`ApiResponse`]; status and body assertions belong to
/// the caller.
#[derive(Debug, Clone, Copy)]
pub struct IdeaApi<'a> {
    /// Session used for every call.
    session: &'a Session,
}

impl<'a> IdeaApi<'a> {
    /// Binds the calls to a session.
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self {
            session,
        }
    }

    /// `POST /api/Idea/Create`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub fn create(&self, payload: &IdeaPayload) -> Result<ApiResponse, ClientError> {
        self.session.send_json(Method::POST, CREATE_IDEA_PATH, &[], payload)
    }

    /// `GET /api/Idea/All`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub fn list(&self) -> Result<ApiResponse, ClientError> {
        self.session.send_empty(Method::GET, LIST_IDEAS_PATH, &[])
    }

    /// `PUT /api/Idea/Edit?ideaId=<idea_id>`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub fn edit(&self, idea_id: &str, payload: &IdeaPayload) -> Result<ApiResponse, ClientError> {
        self.session.send_json(Method::PUT, EDIT_IDEA_PATH, &[(IDEA_ID_PARAM, idea_id)], payload)
    }

    /// `DELETE /api/Idea/Delete?ideaId=<idea_id>`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] on transport failure.
    pub fn delete(&self, idea_id: &str) -> Result<ApiResponse, ClientError> {
        self.session.send_empty(Method::DELETE, DELETE_IDEA_PATH, &[(IDEA_ID_PARAM, idea_id)])
    }
}
