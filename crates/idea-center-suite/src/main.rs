// crates/idea-center-suite/src/main.rs
// ============================================================================
// Module: Idea Center Suite CLI Entry Point
// Description: Command dispatcher for running and listing the suite cases.
// Purpose: Run the ordered Idea API suite and report per-case verdicts.
// Dependencies: clap, idea-center-suite, thiserror
// ============================================================================

//! ## Overview
//! `idea-center-suite run` loads configuration, installs logging, executes the
//! seven ordered cases against one authenticated session, writes run artifacts,
//! and prints one line per case. The exit code is non-zero when setup failed or
//! any case failed. `idea-center-suite cases` prints the catalog without
//! touching the network.


// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::ArgAction;
use clap::Args;
use clap::CommandFactory;
use clap::Parser;
use clap::Subcommand;
use idea_center_suite::SuiteConfig;
use idea_center_suite::SuiteError;
use idea_center_suite::logging::init_tracing;
use idea_center_suite::ordered_cases;
use idea_center_suite::run_suite;
use thiserror::Error;

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "idea-center-suite", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue, global = true)]
    show_version: bool,
    /// Configuration file (overrides `IDEA_CENTER_CONFIG`).
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,
    /// Selected subcommand to execute.
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Supported CLI subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the ordered suite against the configured API.
    Run(RunCommand),
    /// Print the ordered case catalog.
    Cases,
}

/// Arguments for `run`.
#[derive(Args, Debug)]
struct RunCommand {
    /// Directory receiving run artifacts (overrides `run_root` config).
    #[arg(long, value_name = "DIR")]
    run_root: Option<PathBuf>,
}

/// CLI failures surfaced to the user.
#[derive(Debug, Error)]
enum CliError {
    /// Configuration, setup, or artifact failure.
    #[error(transparent)]
    Suite(#[from] SuiteError),
    /// Logging could not be initialized.
    #[error("{0}")]
    Logging(String),
    /// Writing to stdout failed.
    #[error("failed to write to stdout: {0}")]
    Output(#[source] std::io::Error),
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
fn main() -> ExitCode {
    match run() {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI command dispatcher.
fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();
    if cli.show_version {
        write_stdout_line(&format!("idea-center-suite {}", env!("CARGO_PKG_VERSION")))?;
        return Ok(ExitCode::SUCCESS);
    }
    let Some(command) = cli.command else {
        Cli::command().print_help().map_err(CliError::Output)?;
        return Ok(ExitCode::SUCCESS);
    };
    match command {
        Commands::Run(command) => command_run(cli.config, &command),
        Commands::Cases => command_cases(),
    }
}

// ============================================================================
// SECTION: Commands
// ============================================================================

/// Executes the `run` command.
fn command_run(config_path: Option<PathBuf>, command: &RunCommand) -> CliResult<ExitCode> {
    let config = SuiteConfig::load(config_path.as_deref()).map_err(SuiteError::from)?;
    init_tracing(&config.log).map_err(CliError::Logging)?;

    let run = run_suite(&config)?;
    for line in run.report.console_lines() {
        write_stdout_line(&line)?;
    }
    let run_root = command.run_root.as_deref().or(config.run_root.as_deref());
    let artifacts = run.write_artifacts(run_root)?;
    write_stdout_line(&format!("artifacts: {}", artifacts.root().display()))?;

    if run.report.passed() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}

/// Executes the `cases` command.
fn command_cases() -> CliResult<ExitCode> {
    for case in ordered_cases() {
        let requires = case.requires.map_or("-", |prerequisite| prerequisite.as_str());
        write_stdout_line(&format!(
            "{} {} [requires: {}] {}",
            case.order, case.name, requires, case.summary
        ))?;
    }
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Output
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> CliResult<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}").map_err(CliError::Output)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let mut stderr = std::io::stderr();
    let _ = writeln!(&mut stderr, "{message}");
    ExitCode::FAILURE
}
