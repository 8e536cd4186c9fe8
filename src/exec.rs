//! External process invocation: the compiler under test and the artifact
//! it produces.
//!
//! The compiler contract is positional: it is invoked as
//! `<compiler> <test-file-path>`, must exit 0 on success and leave an
//! executable artifact behind, and may write diagnostics to standard
//! output on failure. The artifact is then invoked with no arguments and
//! its standard output captured.
//!
//! Orchestration goes through the [`Invoker`] trait so the runner can be
//! exercised with a scripted invoker that never spawns a process.

use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Conventional artifact path produced by the compiler under test.
pub const DEFAULT_ARTIFACT: &str = "./output";

/// Errors raised when a subprocess cannot be spawned at all.
///
/// A compiler that runs and exits non-zero is a classified test failure,
/// not an `ExecError`; these errors abort the whole run.
#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to invoke compiler '{program}': {source}")]
    Compiler { program: String, source: std::io::Error },

    #[error("failed to invoke artifact '{path}': {source}")]
    Artifact { path: String, source: std::io::Error },
}

/// Captured result of one compiler invocation.
#[derive(Debug)]
pub struct CompileOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// Captured result of one artifact invocation.
#[derive(Debug)]
pub struct RunOutput {
    pub stdout: String,
}

/// Process-spawning boundary of the runner.
pub trait Invoker {
    /// Invoke the compiler on one test file, blocking until it exits.
    fn compile(&self, test_file: &Path) -> Result<CompileOutput, ExecError>;

    /// Invoke the compiled artifact, blocking until it exits.
    fn run_artifact(&self) -> Result<RunOutput, ExecError>;
}

/// Default invoker: spawns the real compiler and artifact.
///
/// The artifact path is a parameter rather than a hard-coded `./output`
/// so callers can isolate artifacts per run.
pub struct ProcessInvoker {
    compiler: PathBuf,
    artifact: PathBuf,
}

impl ProcessInvoker {
    pub fn new(compiler: impl AsRef<Path>, artifact: impl AsRef<Path>) -> Self {
        Self {
            compiler: compiler.as_ref().to_path_buf(),
            artifact: artifact.as_ref().to_path_buf(),
        }
    }
}

impl Invoker for ProcessInvoker {
    fn compile(&self, test_file: &Path) -> Result<CompileOutput, ExecError> {
        tracing::debug!("invoking {} {}", self.compiler.display(), test_file.display());

        let output = Command::new(&self.compiler)
            .arg(test_file)
            .output()
            .map_err(|source| ExecError::Compiler {
                program: self.compiler.display().to_string(),
                source,
            })?;

        Ok(CompileOutput {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        })
    }

    fn run_artifact(&self) -> Result<RunOutput, ExecError> {
        let output = Command::new(&self.artifact)
            .output()
            .map_err(|source| ExecError::Artifact {
                path: self.artifact.display().to_string(),
                source,
            })?;

        Ok(RunOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_compiler_is_an_exec_error() {
        let invoker = ProcessInvoker::new("/no/such/compiler", DEFAULT_ARTIFACT);
        let err = invoker.compile(Path::new("whatever.src")).unwrap_err();
        assert!(matches!(err, ExecError::Compiler { .. }));
    }

    #[test]
    fn missing_artifact_is_an_exec_error() {
        let invoker = ProcessInvoker::new("/no/such/compiler", "/no/such/artifact");
        let err = invoker.run_artifact().unwrap_err();
        assert!(matches!(err, ExecError::Artifact { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_compiler_reports_success() {
        // `true` ignores its argument and exits 0.
        let invoker = ProcessInvoker::new("true", DEFAULT_ARTIFACT);
        let out = invoker.compile(Path::new("ignored.src")).unwrap();
        assert!(out.success);
        assert!(out.stdout.is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_compiler_reports_failure() {
        // `false` ignores its argument and exits 1.
        let invoker = ProcessInvoker::new("false", DEFAULT_ARTIFACT);
        let out = invoker.compile(Path::new("ignored.src")).unwrap();
        assert!(!out.success);
    }
}
