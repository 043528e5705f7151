// crates/idea-center-suite/src/runner.rs
// ============================================================================
// Module: Sequential Runner
// Description: Setup, ordered case execution, and guaranteed teardown.
// Purpose: Drive one suite run against one authenticated session.
// Dependencies: idea-center-client, thiserror, tracing
// ============================================================================

//! ## Overview
//! A run resolves the credential, opens the single [`Session`], executes the
//! given cases strictly in slice order, and closes the session whatever the
//! cases did. Setup failures abort the run before any case executes. Case
//! failures never stop later cases; a case whose prerequisite is missing fails
//! without sending a request.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io;
use std::path::Path;
use std::time::Instant;

use idea_center_client::ClientError;
use idea_center_client::Exchange;
use idea_center_client::IdeaApi;
use idea_center_client::Session;
use idea_center_client::resolve_token;
use thiserror::Error;
use tracing::info;
use tracing::warn;

use crate::cases::CaseDescriptor;
use crate::cases::CaseFailure;
use crate::cases::SuiteContext;
use crate::cases::ordered_cases;
use crate::config::ConfigError;
use crate::config::SuiteConfig;
use crate::report::CaseOutcome;
use crate::report::CaseStatus;
use crate::report::RunArtifacts;
use crate::report::SuiteReport;
use crate::report::millis;
use crate::report::now_millis;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Suite-level errors.
#[derive(Debug, Error)]
pub enum SuiteError {
    /// Credential resolution or session creation failed; no case ran.
    #[error("suite setup failed: {0}")]
    Setup(#[source] ClientError),
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// Run artifacts could not be written.
    #[error("failed to write run artifacts: {0}")]
    Report(#[source] io::Error),
}

/// Everything a finished run produced.
#[derive(Debug, Clone)]
pub struct SuiteRun {
    /// Per-case outcomes and notes.
    pub report: SuiteReport,
    /// Every HTTP exchange of the session.
    pub transcript: Vec<Exchange>,
    /// Shared state as left by the last case.
    pub context: SuiteContext,
}

impl SuiteRun {
    /// Writes `summary.json`, `summary.md`, and `transcript.json`.
    ///
    /// # Errors
    ///
    /// Returns [`SuiteError::Report`] when the directory or a file cannot be
    /// written.
    pub fn write_artifacts(&self, run_root: Option<&Path>) -> Result<RunArtifacts, SuiteError> {
        let artifacts = RunArtifacts::new(run_root).map_err(SuiteError::Report)?;
        artifacts.write_run(&self.report, &self.transcript).map_err(SuiteError::Report)?;
        info!(root = %artifacts.root().display(), "run artifacts written");
        Ok(artifacts)
    }
}

// ============================================================================
// SECTION: Entry Points
// ============================================================================

/// Runs the full catalog in order.
///
/// # Errors
///
/// Returns [`SuiteError::Setup`] when no session could be established.
pub fn run_suite(config: &SuiteConfig) -> Result<SuiteRun, SuiteError> {
    run_cases(config, ordered_cases())
}

/// Runs `cases` in slice order against one fresh session.
///
/// # Errors
///
/// Returns [`SuiteError::Setup`] when no session could be established.
pub fn run_cases(config: &SuiteConfig, cases: &[CaseDescriptor]) -> Result<SuiteRun, SuiteError> {
    let started_at_ms = now_millis();
    let session = open_session(config)?;
    let mut context = SuiteContext::default();
    let outcomes = execute_sequence(&session, cases, &mut context);
    let transcript = session.close();

    let mut notes = Vec::new();
    if let Some(idea_id) = context.leaked_idea_id() {
        warn!(idea_id = %idea_id, "captured idea was not deleted during the run");
        notes.push(format!("idea {idea_id} was captured but not deleted; it may be leaked"));
    }
    let report = SuiteReport::new(started_at_ms, outcomes, notes);
    info!(
        cases = report.cases.len(),
        failed = report.failed_count(),
        duration_ms = u64::try_from(report.duration_ms).unwrap_or(u64::MAX),
        "suite finished"
    );
    Ok(SuiteRun {
        report,
        transcript,
        context,
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the credential and opens the session.
fn open_session(config: &SuiteConfig) -> Result<Session, SuiteError> {
    let options = config.session_options();
    let source = config.credential_source().map_err(SuiteError::Setup)?;
    let token = resolve_token(&source, &options).map_err(|err| {
        warn!(error = %err, "credential bootstrap failed");
        SuiteError::Setup(err)
    })?;
    Session::open(&options, &token).map_err(SuiteError::Setup)
}

/// Executes each case once, in order, collecting outcomes.
fn execute_sequence(
    session: &Session,
    cases: &[CaseDescriptor],
    context: &mut SuiteContext,
) -> Vec<CaseOutcome> {
    let api = IdeaApi::new(session);
    let mut outcomes = Vec::with_capacity(cases.len());
    for case in cases {
        let started = Instant::now();
        let result = match case.requires {
            Some(prerequisite) if !context.satisfies(prerequisite) => {
                Err(CaseFailure::MissingPrerequisite(prerequisite))
            }
            _ => (case.run)(&api, context),
        };
        let duration_ms = millis(started.elapsed());
        let outcome = match result {
            Ok(detail) => {
                info!(order = case.order, case = case.name, "case passed");
                CaseOutcome {
                    order: case.order,
                    name: case.name.to_string(),
                    status: CaseStatus::Pass,
                    duration_ms,
                    detail,
                }
            }
            Err(failure) => {
                warn!(order = case.order, case = case.name, error = %failure, "case failed");
                CaseOutcome {
                    order: case.order,
                    name: case.name.to_string(),
                    status: CaseStatus::Fail,
                    duration_ms,
                    detail: failure.to_string(),
                }
            }
        };
        outcomes.push(outcome);
    }
    outcomes
}
