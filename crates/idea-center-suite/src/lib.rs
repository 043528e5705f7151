// crates/idea-center-suite/src/lib.rs
// ============================================================================
// Module: Idea Center Suite
// Description: Ordered end-to-end cases for the Idea Center API.
// Purpose: Configure, run, and report the sequential idea lifecycle suite.
// Dependencies: idea-center-client, serde, serde_jcs, thiserror, toml, tracing
// ============================================================================

//! ## Overview
//! The suite authenticates once, runs seven ordered cases against the Idea
//! Center API (create, list, edit, delete, then three rejection checks), and
//! reports pass/fail per case. The id captured by the listing case is threaded
//! into the edit and delete cases through an explicit [`SuiteContext`].
//! Invariants:
//! - Exactly one session exists per run and it is always released.
//! - A setup failure aborts the run before any case executes.
//! - A failed case never stops the cases after it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod cases;
pub mod config;
pub mod logging;
pub mod report;
pub mod runner;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use cases::CaseDescriptor;
pub use cases::CaseFailure;
pub use cases::Prerequisite;
pub use cases::SuiteContext;
pub use cases::case_by_name;
pub use cases::ordered_cases;
pub use config::ConfigError;
pub use config::SuiteConfig;
pub use report::CaseOutcome;
pub use report::CaseStatus;
pub use report::RunArtifacts;
pub use report::SuiteReport;
pub use runner::SuiteError;
pub use runner::SuiteRun;
pub use runner::run_cases;
pub use runner::run_suite;
