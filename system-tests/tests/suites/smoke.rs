// system-tests/tests/suites/smoke.rs
// ============================================================================
// Module: Smoke Tests
// Description: Credential bootstrap and single-session behavior end to end.
// Purpose: Prove one login at most, one session, and fatal setup failures.
// Dependencies: system-tests helpers, idea-center-suite
// ============================================================================

//! Session bootstrap tests against the in-process Idea API stub.

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use std::fs;

use idea_center_client::ClientError;
use idea_center_suite::SuiteError;
use idea_center_suite::run_suite;

use crate::helpers::artifacts::TestReporter;
use crate::helpers::harness::login_config;
use crate::helpers::harness::token_config;
use crate::helpers::idea_api_stub::IdeaApiStub;
use crate::helpers::idea_api_stub::StubOptions;

#[test]
fn static_token_runs_full_suite_without_login() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("static_token_runs_full_suite_without_login")?;
    let options = StubOptions::default();
    let stub = IdeaApiStub::start(options.clone())?;

    let run = run_suite(&token_config(&stub, &options)?)?;
    let artifacts = run.write_artifacts(Some(reporter.artifacts().suite_dir().as_path()))?;

    assert!(run.report.passed(), "{:?}", run.report.console_lines());
    assert_eq!(stub.login_calls(), 0);
    assert_eq!(run.transcript.len(), 7);
    assert!(run.transcript.iter().all(|exchange| exchange.status.is_some()));
    let summary: serde_json::Value =
        serde_json::from_slice(&fs::read(artifacts.root().join("summary.json"))?)?;
    let cases = summary["cases"].as_array().expect("cases array");
    assert_eq!(cases.len(), 7);
    assert!(cases.iter().all(|case| case["status"] == "pass"));
    assert!(summary["started_at_ms"].is_u64());
    assert!(summary["duration_ms"].is_u64());
    let transcript: serde_json::Value =
        serde_json::from_slice(&fs::read(artifacts.root().join("transcript.json"))?)?;
    let exchanges = transcript.as_array().expect("transcript array");
    assert_eq!(exchanges.len(), 7);
    assert!(!fs::read_to_string(artifacts.root().join("transcript.json"))?.contains(&options.token));
    reporter.finish("pass", run.report.console_lines())?;

    let test_summary: serde_json::Value =
        serde_json::from_slice(&fs::read(reporter.artifacts().root().join("test_summary.json"))?)?;
    assert_eq!(test_summary["status"], "pass");
    assert!(test_summary["duration_ms"].is_u64());
    Ok(())
}

#[test]
fn login_credentials_authenticate_exactly_once() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("login_credentials_authenticate_exactly_once")?;
    let options = StubOptions::default();
    let stub = IdeaApiStub::start(options.clone())?;

    let run = run_suite(&login_config(&stub, &options)?)?;

    assert!(run.report.passed(), "{:?}", run.report.console_lines());
    assert_eq!(stub.login_calls(), 1);
    assert_eq!(stub.requests().first().map(String::as_str), Some("POST /api/User/Authentication"));
    reporter.finish("pass", Vec::new())?;
    Ok(())
}

#[test]
fn rejected_login_aborts_before_any_case() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("rejected_login_aborts_before_any_case")?;
    let options = StubOptions {
        login_status: Some(401),
        ..StubOptions::default()
    };
    let stub = IdeaApiStub::start(options.clone())?;

    let result = run_suite(&login_config(&stub, &options)?);

    assert!(matches!(
        result,
        Err(SuiteError::Setup(ClientError::Authentication { status: 401, .. }))
    ));
    assert_eq!(stub.requests(), vec!["POST /api/User/Authentication".to_string()]);
    reporter.finish("pass", Vec::new())?;
    Ok(())
}

#[test]
fn unaccepted_token_fails_every_case_but_runs_them_all() -> Result<(), Box<dyn std::error::Error>> {
    let mut reporter = TestReporter::new("unaccepted_token_fails_every_case_but_runs_them_all")?;
    let options = StubOptions::default();
    let stub = IdeaApiStub::start(options.clone())?;
    let mut config = token_config(&stub, &options)?;
    config.auth.token = Some("expired-token".to_string());

    let run = run_suite(&config)?;

    assert_eq!(run.report.cases.len(), 7);
    assert_eq!(run.report.failed_count(), 7);
    let edit = run.report.outcome("edit_last_created_idea").expect("edit outcome");
    assert!(edit.detail.contains("captured_idea_id"), "{}", edit.detail);
    assert!(stub.ideas().is_empty());
    reporter.finish("pass", run.report.console_lines())?;
    Ok(())
}
