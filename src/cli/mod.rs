//! CLI module for the outcheck harness
//!
//! ## Commands
//!
//! - `run <compiler> <dir>` - Run every test case in a directory
//!
//! ## Design
//!
//! The CLI uses clap for argument parsing with derive macros.
//! Command functions return `CliResult<T>` instead of calling
//! `process::exit`. Only the top-level `run()` function handles errors
//! and exits. Unknown subcommands and bad arity are clap errors with
//! usage text and a non-zero exit.

// Enforce explicit error handling - no panicking in production code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]

pub mod commands;

use std::fmt;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

use crate::exec::DEFAULT_ARTIFACT;
use crate::runner::ComparePolicy;

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
    /// Create a new CLI error with a message and exit code.
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

/// Expected-output test harness for compiler toolchains
#[derive(Parser, Debug)]
#[command(name = "outcheck")]
#[command(version = VERSION)]
#[command(about = "Expected-output test harness for compiler toolchains", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compile and run every test case, comparing captured output
    Run {
        /// Compiler binary under test
        #[arg(value_name = "COMPILER")]
        compiler: PathBuf,

        /// Directory of test-case source files
        #[arg(value_name = "DIR")]
        directory: PathBuf,

        /// Select cases from the `index` manifest inside DIR
        #[arg(long)]
        manifest: bool,

        /// Output comparison policy
        #[arg(long = "compare", value_enum, default_value_t = CompareMode::Strict)]
        compare: CompareMode,

        /// Path of the artifact the compiler produces
        #[arg(long, value_name = "PATH", default_value = DEFAULT_ARTIFACT)]
        artifact: PathBuf,

        /// Also print compiler stderr on failures and per-case timing
        #[arg(short, long)]
        verbose: bool,
    },
}

/// CLI-facing spelling of [`ComparePolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CompareMode {
    /// Byte-for-byte comparison
    Strict,
    /// Ignore one trailing newline from the artifact
    StripTrailingNewline,
}

impl fmt::Display for CompareMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CompareMode::Strict => "strict",
            CompareMode::StripTrailingNewline => "strip-trailing-newline",
        })
    }
}

impl From<CompareMode> for ComparePolicy {
    fn from(mode: CompareMode) -> Self {
        match mode {
            CompareMode::Strict => ComparePolicy::Strict,
            CompareMode::StripTrailingNewline => ComparePolicy::StripTrailingNewline,
        }
    }
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

/// Execute the CLI command and return result.
fn execute(cli: Cli) -> CliResult<ExitCode> {
    match cli.command {
        Command::Run {
            compiler,
            directory,
            manifest,
            compare,
            artifact,
            verbose,
        } => commands::run_tests(&compiler, &directory, manifest, compare.into(), &artifact, verbose),
    }
}

// ============================================================================
// Tests
// ============================================================================
