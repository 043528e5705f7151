// crates/idea-center-suite/src/cases.rs
// ============================================================================
// Module: Case Catalog
// Description: The ordered Idea API cases and their shared run context.
// Purpose: Describe each case's request, expectations, and required state.
// Dependencies: idea-center-client, thiserror
// ============================================================================

//! ## Overview
//! The suite is an explicit, ordered list of [`CaseDescriptor`]s. Cases share
//! one [`SuiteContext`], passed by `&mut`, instead of global state: the listing
//! case writes the captured idea id and the edit/delete cases read it. A case
//! that declares a [`Prerequisite`] is only run once that state exists.
//! Invariants:
//! - Catalog order is strictly increasing by `order`.
//! - The captured id is only ever written by a successful listing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use idea_center_client::ApiMessage;
use idea_center_client::ApiResponse;
use idea_center_client::ClientError;
use idea_center_client::IdeaApi;
use idea_center_client::IdeaId;
use idea_center_client::IdeaPayload;
use idea_center_client::IdeaRecord;
use idea_center_client::StatusCode;
use thiserror::Error;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

/// Title used by the create case.
pub const TEST_IDEA_TITLE: &str = "Test Idea";
/// Description used by the create case.
pub const TEST_IDEA_DESCRIPTION: &str = "This is a test idea.";
/// Title used by the edit cases.
pub const UPDATED_IDEA_TITLE: &str = "Updated Test Idea";
/// Description used by the edit cases.
pub const UPDATED_IDEA_DESCRIPTION: &str = "This is an updated test idea.";
/// Message returned by a successful create.
pub const CREATED_MESSAGE: &str = "Successfully created!";
/// Message returned by a successful edit.
pub const EDITED_MESSAGE: &str = "Edited successfully";
/// Substring of a successful delete response body.
pub const DELETED_CONFIRMATION: &str = "The idea is deleted!";
/// Well-formed id that does not name any idea.
pub const NON_EXISTING_IDEA_ID: &str = "nqmaMe";
/// Placeholder literal that is not an id at all.
pub const PLACEHOLDER_IDEA_ID: &str = "lastCreatedIdeaId";

// ============================================================================
// SECTION: Context
// ============================================================================

/// State shared across the cases of one run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteContext {
    /// Id of the last listed idea, set by the listing case.
    captured_idea_id: Option<IdeaId>,
    /// Whether the captured idea was deleted by the delete case.
    captured_deleted: bool,
}

impl SuiteContext {
    /// Returns the captured idea id, if the listing case has run successfully.
    #[must_use]
    pub const fn captured_idea_id(&self) -> Option<&IdeaId> {
        self.captured_idea_id.as_ref()
    }

    /// Returns the captured id if it was never deleted during the run.
    #[must_use]
    pub const fn leaked_idea_id(&self) -> Option<&IdeaId> {
        if self.captured_deleted { None } else { self.captured_idea_id.as_ref() }
    }

    /// Returns whether `prerequisite` is satisfied.
    #[must_use]
    pub const fn satisfies(&self, prerequisite: Prerequisite) -> bool {
        match prerequisite {
            Prerequisite::CapturedIdeaId => self.captured_idea_id.is_some(),
        }
    }

    /// Stores the id discovered by the listing case.
    pub(crate) fn capture(&mut self, idea_id: IdeaId) {
        self.captured_idea_id = Some(idea_id);
        self.captured_deleted = false;
    }

    /// Records that the captured idea was deleted.
    pub(crate) const fn mark_deleted(&mut self) {
        self.captured_deleted = true;
    }

    /// Returns the captured id or the prerequisite failure.
    fn require_captured_id(&self) -> Result<IdeaId, CaseFailure> {
        self.captured_idea_id
            .clone()
            .ok_or(CaseFailure::MissingPrerequisite(Prerequisite::CapturedIdeaId))
    }
}

/// State a case needs from an earlier case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prerequisite {
    /// An idea id captured by the listing case.
    CapturedIdeaId,
}

impl Prerequisite {
    /// Returns a stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::CapturedIdeaId => "captured_idea_id",
        }
    }
}

// ============================================================================
// SECTION: Failures
// ============================================================================

/// Why a case failed.
///
/// # Invariants
/// - `body` payloads hold the raw response text exactly as received.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaseFailure {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// Status code differs from the expected one.
    #[error("expected status {expected}, got {actual}; body: {body}")]
    UnexpectedStatus {
        /// Expected status code.
        expected: u16,
        /// Actual status code.
        actual: u16,
        /// Raw response body.
        body: String,
    },
    /// Envelope message differs from the expected one.
    #[error("expected message {expected:?}, got {actual:?}")]
    UnexpectedMessage {
        /// Expected message.
        expected: &'static str,
        /// Actual message, if any.
        actual: Option<String>,
    },
    /// Response body lacks the expected confirmation text.
    #[error("expected body to contain {expected:?}; body: {body}")]
    MissingConfirmation {
        /// Expected substring.
        expected: &'static str,
        /// Raw response body.
        body: String,
    },
    /// Response body is not the expected JSON shape.
    #[error("invalid response payload: {detail}; body: {body}")]
    Decode {
        /// Decoder error message.
        detail: String,
        /// Raw response body.
        body: String,
    },
    /// The listing returned no ideas.
    #[error("the list of ideas should not be empty")]
    EmptyListing,
    /// Required state from an earlier case is absent.
    #[error("prerequisite {} not met by an earlier case", .0.as_str())]
    MissingPrerequisite(Prerequisite),
}

impl From<ClientError> for CaseFailure {
    fn from(error: ClientError) -> Self {
        match error {
            ClientError::Decode {
                detail,
                body,
            } => Self::Decode {
                detail,
                body,
            },
            other => Self::Transport(other.to_string()),
        }
    }
}

// ============================================================================
// SECTION: Descriptors
// ============================================================================

/// Result of one case: a short pass note, or the failure.
pub type CaseResult = Result<String, CaseFailure>;

/// Case body signature.
pub type CaseFn = fn(&IdeaApi<'_>, &mut SuiteContext) -> CaseResult;

/// One ordered case.
#[derive(Debug, Clone, Copy)]
pub struct CaseDescriptor {
    /// 1-based position in the sequence.
    pub order: u8,
    /// Stable snake_case name used in reports.
    pub name: &'static str,
    /// One-line description of the request and expectation.
    pub summary: &'static str,
    /// State required from earlier cases.
    pub requires: Option<Prerequisite>,
    /// Case body.
    pub run: CaseFn,
}

/// The fixed catalog, in execution order.
static CASES: [CaseDescriptor; 7] = [
    CaseDescriptor {
        order: 1,
        name: "create_idea",
        summary: "POST /api/Idea/Create with a valid idea returns 200 and the created message",
        requires: None,
        run: create_idea,
    },
    CaseDescriptor {
        order: 2,
        name: "list_ideas",
        summary: "GET /api/Idea/All returns 200 and a non-empty list; captures the last id",
        requires: None,
        run: list_ideas,
    },
    CaseDescriptor {
        order: 3,
        name: "edit_last_created_idea",
        summary: "PUT /api/Idea/Edit on the captured id returns 200 and the edited message",
        requires: Some(Prerequisite::CapturedIdeaId),
        run: edit_last_created_idea,
    },
    CaseDescriptor {
        order: 4,
        name: "delete_last_created_idea",
        summary: "DELETE /api/Idea/Delete on the captured id returns 200 and the confirmation",
        requires: Some(Prerequisite::CapturedIdeaId),
        run: delete_last_created_idea,
    },
    CaseDescriptor {
        order: 5,
        name: "create_idea_without_required_fields",
        summary: "POST /api/Idea/Create with empty title and description returns 400",
        requires: None,
        run: create_idea_without_required_fields,
    },
    CaseDescriptor {
        order: 6,
        name: "edit_non_existing_idea",
        summary: "PUT /api/Idea/Edit on an unknown id returns 400",
        requires: None,
        run: edit_non_existing_idea,
    },
    CaseDescriptor {
        order: 7,
        name: "delete_non_existing_idea",
        summary: "DELETE /api/Idea/Delete on a placeholder id returns 400",
        requires: None,
        run: delete_non_existing_idea,
    },
];

/// Returns the case catalog in execution order.
#[must_use]
pub fn ordered_cases() -> &'static [CaseDescriptor] {
    &CASES
}

/// Looks up a catalog case by name.
#[must_use]
pub fn case_by_name(name: &str) -> Option<&'static CaseDescriptor> {
    CASES.iter().find(|case| case.name == name)
}

// ============================================================================
// SECTION: Cases
// ============================================================================

/// Case 1.
fn create_idea(api: &IdeaApi<'_>, _context: &mut SuiteContext) -> CaseResult {
    let response = api.create(&IdeaPayload::new(TEST_IDEA_TITLE, TEST_IDEA_DESCRIPTION))?;
    expect_status(&response, StatusCode::OK)?;
    expect_message(&response, CREATED_MESSAGE)?;
    Ok(format!("created {TEST_IDEA_TITLE:?}"))
}

/// Case 2.
fn list_ideas(api: &IdeaApi<'_>, context: &mut SuiteContext) -> CaseResult {
    let response = api.list()?;
    expect_status(&response, StatusCode::OK)?;
    let ideas: Vec<IdeaRecord> = response.decode()?;
    let last = ideas.last().ok_or(CaseFailure::EmptyListing)?;
    context.capture(last.id.clone());
    Ok(format!("{} ideas listed, captured id {}", ideas.len(), last.id))
}

/// Case 3.
fn edit_last_created_idea(api: &IdeaApi<'_>, context: &mut SuiteContext) -> CaseResult {
    let idea_id = context.require_captured_id()?;
    let response = api.edit(idea_id.as_str(), &updated_payload())?;
    expect_status(&response, StatusCode::OK)?;
    expect_message(&response, EDITED_MESSAGE)?;
    Ok(format!("edited idea {idea_id}"))
}

/// Case 4.
fn delete_last_created_idea(api: &IdeaApi<'_>, context: &mut SuiteContext) -> CaseResult {
    let idea_id = context.require_captured_id()?;
    let response = api.delete(idea_id.as_str())?;
    expect_status(&response, StatusCode::OK)?;
    if !response.body().contains(DELETED_CONFIRMATION) {
        return Err(CaseFailure::MissingConfirmation {
            expected: DELETED_CONFIRMATION,
            body: response.body().to_string(),
        });
    }
    context.mark_deleted();
    Ok(format!("deleted idea {idea_id}"))
}

/// Case 5.
fn create_idea_without_required_fields(
    api: &IdeaApi<'_>,
    _context: &mut SuiteContext,
) -> CaseResult {
    let response = api.create(&IdeaPayload::new("", ""))?;
    expect_status(&response, StatusCode::BAD_REQUEST)?;
    Ok("empty idea rejected".to_string())
}

/// Case 6.
fn edit_non_existing_idea(api: &IdeaApi<'_>, _context: &mut SuiteContext) -> CaseResult {
    let response = api.edit(NON_EXISTING_IDEA_ID, &updated_payload())?;
    expect_status(&response, StatusCode::BAD_REQUEST)?;
    Ok(format!("edit of {NON_EXISTING_IDEA_ID:?} rejected"))
}

/// Case 7.
fn delete_non_existing_idea(api: &IdeaApi<'_>, _context: &mut SuiteContext) -> CaseResult {
    let response = api.delete(PLACEHOLDER_IDEA_ID)?;
    expect_status(&response, StatusCode::BAD_REQUEST)?;
    Ok(format!("delete of {PLACEHOLDER_IDEA_ID:?} rejected"))
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Body sent by both edit cases.
fn updated_payload() -> IdeaPayload {
    IdeaPayload::new(UPDATED_IDEA_TITLE, UPDATED_IDEA_DESCRIPTION)
}

/// Fails unless the response status equals `expected`.
pub(crate) fn expect_status(response: &ApiResponse, expected: StatusCode) -> Result<(), CaseFailure> {
    if response.status() == expected {
        return Ok(());
    }
    Err(CaseFailure::UnexpectedStatus {
        expected: expected.as_u16(),
        actual: response.status().as_u16(),
        body: response.body().to_string(),
    })
}

/// Fails unless the body decodes to an envelope whose message is `expected`.
pub(crate) fn expect_message(
    response: &ApiResponse,
    expected: &'static str,
) -> Result<(), CaseFailure> {
    let message: ApiMessage = response.decode()?;
    if message.msg.as_deref() == Some(expected) {
        return Ok(());
    }
    Err(CaseFailure::UnexpectedMessage {
        expected,
        actual: message.msg,
    })
}
