//! CLI for the SMS2 language tools
//!
//! ## Commands
//!
//! - `check <file>` - Analyze a mapping and report diagnostics
//! - `hover <file> <line> <character>` - Hover information at a position
//! - `complete <file> <line> <character>` - Completion items at a position
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling `process::exit`.
//! Only the top-level `run()` function handles errors and exits.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use miette::{NamedSource, Report};
use sms2_syntax::position::Position;

use crate::analysis::{Analysis, completion, hover};
use crate::diagnostics;

// ============================================================================
// CLI Error handling
// ============================================================================

/// Exit code for CLI operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExitCode(pub i32);

impl ExitCode {
    pub const SUCCESS: ExitCode = ExitCode(0);
    pub const FAILURE: ExitCode = ExitCode(1);
}

/// Error type for CLI operations.
///
/// Contains a user-facing message and an exit code. The CLI entry point
/// catches these errors, prints the message, and exits with the code.
#[derive(Debug)]
pub struct CliError {
    /// User-facing error message (already formatted for display)
    pub message: String,
    /// Exit code to return to the shell
    pub exit_code: ExitCode,
}

impl CliError {
    pub fn new(message: impl Into<String>, exit_code: ExitCode) -> Self {
        Self {
            message: message.into(),
            exit_code,
        }
    }

    /// Create a failure error (exit code 1).
    pub fn failure(message: impl Into<String>) -> Self {
        Self::new(message, ExitCode::FAILURE)
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Clap CLI definition
// ============================================================================

/// SMS2 mapping language tools
#[derive(Parser, Debug)]
#[command(name = "sms2")]
#[command(version = VERSION)]
#[command(about = "Language tools for Stardog Mapping Syntax 2", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze a mapping file and report diagnostics
    Check {
        /// Mapping file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Emit diagnostics as JSON instead of rendered reports
        #[arg(long)]
        json: bool,
    },

    /// Show hover information at a position
    Hover {
        /// Mapping file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Zero-based line
        #[arg(value_name = "LINE")]
        line: u32,
        /// Zero-based character
        #[arg(value_name = "CHARACTER")]
        character: u32,
    },

    /// List completion items at a position
    Complete {
        /// Mapping file to analyze
        #[arg(value_name = "FILE")]
        file: PathBuf,
        /// Zero-based line
        #[arg(value_name = "LINE")]
        line: u32,
        /// Zero-based character
        #[arg(value_name = "CHARACTER")]
        character: u32,
    },
}

// ============================================================================
// CLI entry point
// ============================================================================

/// Main CLI entry point.
///
/// This is the only place where `process::exit` is called. All command
/// implementations return `CliResult` and errors are handled here.
pub fn run() {
    let cli = Cli::parse();

    match execute(cli) {
        Ok(exit_code) => {
            if exit_code.0 != 0 {
                process::exit(exit_code.0);
            }
        }
        Err(e) => {
            if !e.message.is_empty() {
                eprintln!("{}", e.message);
            }
            process::exit(e.exit_code.0);
        }
    }
}

fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Check { file, json } => check_file(&file, json),
        Command::Hover {
            file,
            line,
            character,
        } => hover_at(&file, Position::new(line, character)),
        Command::Complete {
            file,
            line,
            character,
        } => complete_at(&file, Position::new(line, character)),
    }
}

// ============================================================================
// Commands
// ============================================================================

fn check_file(path: &Path, json: bool) -> CliResult<ExitCode> {
    let (name, analysis) = analyze_file(path)?;
    let diagnostics = diagnostics::collect(&analysis);

    if json {
        println!("{}", to_json(&diagnostics)?);
    } else {
        for error in analysis.errors() {
            let report = Report::new(error.clone())
                .with_source_code(NamedSource::new(&name, analysis.text().to_string()));
            eprintln!("{report:?}");
        }
        if diagnostics.is_empty() {
            println!("{name}: no problems found");
        } else {
            eprintln!("{name}: {} problem(s) found", diagnostics.len());
        }
    }

    if diagnostics.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn hover_at(path: &Path, position: Position) -> CliResult<ExitCode> {
    let (_, analysis) = analyze_file(path)?;
    match hover::hover(&analysis, position) {
        Some(hover) => println!("{}", to_json(&hover)?),
        None => println!("null"),
    }
    Ok(ExitCode::SUCCESS)
}

fn complete_at(path: &Path, position: Position) -> CliResult<ExitCode> {
    let (_, analysis) = analyze_file(path)?;
    let items = completion::complete(&analysis, position);
    println!("{}", to_json(&items)?);
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// Helpers
// ============================================================================

fn analyze_file(path: &Path) -> CliResult<(String, Analysis)> {
    let name = path.display().to_string();
    let text = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("error: cannot read {name}: {e}")))?;
    tracing::debug!(file = %name, len = text.len(), "analyzing file");
    Ok((name, Analysis::new(text)))
}

fn to_json<T: serde::Serialize>(value: &T) -> CliResult<String> {
    serde_json::to_string_pretty(value)
        .map_err(|e| CliError::failure(format!("error: cannot serialize output: {e}")))
}
