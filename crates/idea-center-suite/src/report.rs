// crates/idea-center-suite/src/report.rs
// ============================================================================
// Module: Run Report
// Description: Per-case outcomes and run artifacts for a suite run.
// Purpose: Summarize pass/fail per case and persist deterministic summaries.
// Dependencies: idea-center-client, serde, serde_jcs
// ============================================================================

//! ## Overview
//! A [`SuiteReport`] records one [`CaseOutcome`] per executed case plus
//! run-level notes. [`RunArtifacts`] writes `summary.json` (canonical JSON),
//! `summary.md`, and `transcript.json` under the run root.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt::Write as _;
use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use idea_center_client::Exchange;
use serde::Serialize;

// ============================================================================
// SECTION: Outcomes
// ============================================================================

/// Case verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseStatus {
    /// All assertions held.
    Pass,
    /// An assertion failed, the request failed, or a prerequisite was missing.
    Fail,
}

impl CaseStatus {
    /// Returns a stable uppercase label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
        }
    }
}

/// Outcome of one executed case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CaseOutcome {
    /// Catalog position.
    pub order: u8,
    /// Case name.
    pub name: String,
    /// Verdict.
    pub status: CaseStatus,
    /// Wall time spent in the case.
    pub duration_ms: u64,
    /// Pass note or failure message.
    pub detail: String,
}

/// Summary of one suite run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    /// Run start (unix millis).
    pub started_at_ms: u64,
    /// Run end (unix millis).
    pub ended_at_ms: u64,
    /// Total run time.
    pub duration_ms: u64,
    /// Outcomes in execution order.
    pub cases: Vec<CaseOutcome>,
    /// Run-level notes, such as possibly leaked ideas.
    pub notes: Vec<String>,
}

impl SuiteReport {
    /// Builds a report ending now.
    #[must_use]
    pub fn new(started_at_ms: u64, cases: Vec<CaseOutcome>, notes: Vec<String>) -> Self {
        let ended_at_ms = now_millis();
        Self {
            started_at_ms,
            ended_at_ms,
            duration_ms: ended_at_ms.saturating_sub(started_at_ms),
            cases,
            notes,
        }
    }

    /// Returns true when every case passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.cases.iter().all(|case| case.status == CaseStatus::Pass)
    }

    /// Returns the number of failed cases.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.cases.iter().filter(|case| case.status == CaseStatus::Fail).count()
    }

    /// Returns the outcome of the named case, if it ran.
    #[must_use]
    pub fn outcome(&self, name: &str) -> Option<&CaseOutcome> {
        self.cases.iter().find(|case| case.name == name)
    }

    /// One console line per case plus a totals line.
    #[must_use]
    pub fn console_lines(&self) -> Vec<String> {
        let mut lines: Vec<String> = self
            .cases
            .iter()
            .map(|case| {
                format!(
                    "[{}] {} {} ({} ms): {}",
                    case.status.label(),
                    case.order,
                    case.name,
                    case.duration_ms,
                    case.detail
                )
            })
            .collect();
        lines.extend(self.notes.iter().map(|note| format!("note: {note}")));
        lines.push(format!(
            "{} cases: {} passed, {} failed",
            self.cases.len(),
            self.cases.len() - self.failed_count(),
            self.failed_count()
        ));
        lines
    }

    /// Renders the markdown summary.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        out.push_str("# Idea Center Suite Summary\n\n");
        out.push_str("## Status\n\n");
        let verdict = if self.passed() { "pass" } else { "fail" };
        let _ = writeln!(out, "- Status: {verdict}");
        let _ = writeln!(out, "- Duration (ms): {}", self.duration_ms);
        out.push_str("\n## Cases\n\n");
        out.push_str("| # | Case | Status | Duration (ms) | Detail |\n");
        out.push_str("|---|------|--------|---------------|--------|\n");
        for case in &self.cases {
            let _ = writeln!(
                out,
                "| {} | {} | {} | {} | {} |",
                case.order,
                case.name,
                case.status.label(),
                case.duration_ms,
                case.detail.replace('|', "\\|").replace('\n', " ")
            );
        }
        out.push_str("\n## Notes\n\n");
        if self.notes.is_empty() {
            out.push_str("- None\n");
        } else {
            for note in &self.notes {
                let _ = writeln!(out, "- {note}");
            }
        }
        out
    }
}

/// Returns the current unix time in milliseconds.
#[must_use]
pub fn now_millis() -> u64 {
    millis(SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default())
}

/// Converts a duration to whole milliseconds, saturating at `u64::MAX`.
#[must_use]
pub fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

// ============================================================================
// SECTION: Artifacts
// ============================================================================

/// Artifact directory for one run.
#[derive(Debug, Clone)]
pub struct RunArtifacts {
    /// Directory receiving the files.
    root: PathBuf,
}

impl RunArtifacts {
    /// Creates the artifact root, defaulting to `target/idea-center/run_<millis>`.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created.
    pub fn new(run_root: Option<&Path>) -> io::Result<Self> {
        let root = run_root.map_or_else(
            || PathBuf::from("target/idea-center").join(format!("run_{}", now_millis())),
            Path::to_path_buf,
        );
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
        })
    }

    /// Returns the root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Writes a JSON artifact using canonical JCS serialization.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when serialization or the write fails.
    pub fn write_json<T: Serialize>(&self, name: &str, value: &T) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        let bytes = serde_jcs::to_vec(value).map_err(|err| io::Error::other(err.to_string()))?;
        fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Writes a UTF-8 text artifact.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the write fails.
    pub fn write_text(&self, name: &str, value: &str) -> io::Result<PathBuf> {
        let path = self.root.join(name);
        fs::write(&path, value.as_bytes())?;
        Ok(path)
    }

    /// Writes the summary pair and the request transcript.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when any artifact cannot be written.
    pub fn write_run(&self, report: &SuiteReport, transcript: &[Exchange]) -> io::Result<Vec<PathBuf>> {
        Ok(vec![
            self.write_json("summary.json", report)?,
            self.write_text("summary.md", &report.to_markdown())?,
            self.write_json("transcript.json", &transcript)?,
        ])
    }
}
