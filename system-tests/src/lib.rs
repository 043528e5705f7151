// system-tests/src/lib.rs
// ============================================================================
// Module: Idea Center System Tests Library
// Description: Shared configuration for system test scenarios.
// Purpose: Provide common utilities for Idea Center system-test binaries.
// Dependencies: std
// ============================================================================

//! ## Overview
//! This crate hosts shared configuration used by the Idea Center system-test
//! binaries in `system-tests/tests`. Stub-backed suites run by default with the
//! `system-tests` feature; the live API suite additionally needs
//! `IDEA_CENTER_SYSTEM_TEST_LIVE=1` and the suite's `IDEA_CENTER_*` settings.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
