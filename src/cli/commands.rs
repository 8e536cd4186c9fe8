//! CLI command implementations
//!
//! All command functions return `CliResult<ExitCode>` instead of calling
//! `process::exit`. Error handling and exits happen in the top-level
//! `run()`.

use std::path::Path;

use crate::exec::ProcessInvoker;
use crate::runner::{self, ComparePolicy, ConsoleReporter};
use crate::suite;

use super::{CliError, CliResult, ExitCode};

/// Run every test case in `directory` against `compiler`.
///
/// Classified test failures (compile, behavior) are reported on the
/// console and do not affect the exit code; only environment errors
/// (unreadable directory, missing manifest, unspawnable process) abort
/// the run with a failure exit.
pub fn run_tests(
    compiler: &Path,
    directory: &Path,
    manifest: bool,
    policy: ComparePolicy,
    artifact: &Path,
    verbose: bool,
) -> CliResult<ExitCode> {
    let suite = if manifest {
        suite::from_manifest(directory)
    } else {
        suite::from_directory(directory)
    }
    .map_err(|e| CliError::failure(e.to_string()))?;

    let invoker = ProcessInvoker::new(compiler, artifact);
    let mut reporter = ConsoleReporter::new(verbose);

    runner::run_suite(&suite, &invoker, policy, &mut reporter)
        .map_err(|e| CliError::failure(e.to_string()))?;

    Ok(ExitCode::SUCCESS)
}
