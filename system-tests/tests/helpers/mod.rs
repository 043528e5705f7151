// system-tests/tests/helpers/mod.rs
// ============================================================================
// Module: System Test Helpers
// Description: Shared helpers for Idea Center system-tests.
// Purpose: Provide the API stub, suite harness, and artifact utilities.
// Dependencies: system-tests, idea-center-suite, tiny_http
// ============================================================================

//! ## Overview
//! Shared helpers for Idea Center system-tests.
//! Invariants:
//! - Stub-backed tests never leave the loopback interface.
//! - Every test writes a summary, even when it panics.

#![allow(dead_code, reason = "Shared helpers are reused across multiple test suites.")]

pub mod artifacts;
pub mod idea_api_stub;
