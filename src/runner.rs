//! Per-case compile → run → compare pipeline and the console report.
//!
//! ## Reporter trait
//!
//! The runner reports through a [`Reporter`] trait to separate reporting
//! from execution. [`ConsoleReporter`] implements the human-readable
//! console contract; tests substitute a recording reporter.
//!
//! ## Case lifecycle
//!
//! `Pending → Compiling → {CompileFailed | Compiled} → Running →
//! {BehaviorMismatch | Passed}`. Terminal outcomes are reported exactly
//! once, immediately, and the run always continues to the next case.

use std::fs;
use std::time::{Duration, Instant};

use thiserror::Error;

use crate::annotation::{self, AnnotationError};
use crate::exec::{ExecError, Invoker};
use crate::suite::{Suite, TestCase};

/// How captured output is matched against the expectation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ComparePolicy {
    /// Byte-for-byte equality.
    #[default]
    Strict,
    /// Remove one trailing newline from the actual output first, to
    /// tolerate artifacts that always end their output with `\n`.
    StripTrailingNewline,
}

impl ComparePolicy {
    pub fn matches(self, expected: &str, actual: &str) -> bool {
        match self {
            ComparePolicy::Strict => expected == actual,
            ComparePolicy::StripTrailingNewline => {
                expected == actual.strip_suffix('\n').unwrap_or(actual)
            }
        }
    }
}

/// Terminal outcome of a single test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    /// The compiler exited non-zero; carries its captured diagnostics.
    CompileFailed { stdout: String, stderr: String },
    /// The artifact ran but printed the wrong bytes.
    BehaviorMismatch { expected: String, actual: String },
}

impl TestOutcome {
    pub fn passed(&self) -> bool {
        matches!(self, TestOutcome::Passed)
    }

    /// Failure reason tag as printed in the report.
    pub fn reason(&self) -> Option<&'static str> {
        match self {
            TestOutcome::Passed => None,
            TestOutcome::CompileFailed { .. } => Some("compile"),
            TestOutcome::BehaviorMismatch { .. } => Some("behavior"),
        }
    }
}

/// Tally of a whole run, returned as a value.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub run: usize,
    pub passed: usize,
}

/// Errors that abort the run.
///
/// Classified per-case failures (`compile`, `behavior`) are data, not
/// errors: the run recovers from them and moves on. These do not.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("cannot read test case '{path}': {source}")]
    ReadCase { path: String, source: std::io::Error },

    #[error("malformed annotation in '{path}': {source}")]
    Annotation { path: String, source: AnnotationError },

    #[error(transparent)]
    Exec(#[from] ExecError),
}

/// Observer for run progress.
pub trait Reporter {
    /// Called once per case, immediately after it reaches a terminal state.
    fn on_case_finished(&mut self, name: &str, outcome: &TestOutcome, elapsed: Duration);

    /// Called once after the last case.
    fn on_run_finished(&mut self, summary: &RunSummary);

    /// Called with the names the manifest excluded (possibly empty).
    fn on_excluded(&mut self, names: &[String]);
}

/// Default console reporter.
#[derive(Default)]
pub struct ConsoleReporter {
    pub verbose: bool,
}

impl ConsoleReporter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Reporter for ConsoleReporter {
    fn on_case_finished(&mut self, name: &str, outcome: &TestOutcome, elapsed: Duration) {
        if self.verbose {
            println!("{} ({}ms)", status_line(name, outcome), elapsed.as_millis());
        } else {
            println!("{}", status_line(name, outcome));
        }

        match outcome {
            TestOutcome::Passed => {}
            TestOutcome::CompileFailed { stdout, stderr } => {
                // Compiler diagnostics are passed through verbatim.
                print!("{}", stdout);
                if self.verbose && !stderr.is_empty() {
                    eprint!("{}", stderr);
                }
            }
            TestOutcome::BehaviorMismatch { expected, actual } => {
                println!("{}", mismatch_line(expected, actual));
            }
        }
    }

    fn on_run_finished(&mut self, summary: &RunSummary) {
        println!("{}", summary_line(summary));
    }

    fn on_excluded(&mut self, names: &[String]) {
        if !names.is_empty() {
            println!("excluded (not in manifest): {}", names.join(", "));
        }
    }
}

/// Per-case status line: `SUCCESS: <name>` or `FAILED: <name> (<reason>)`.
fn status_line(name: &str, outcome: &TestOutcome) -> String {
    match outcome.reason() {
        None => format!("SUCCESS: {}", name),
        Some(reason) => format!("FAILED: {} ({})", name, reason),
    }
}

/// Expected/given diagnostic in debug-escaped form, so invisible
/// characters show up.
fn mismatch_line(expected: &str, actual: &str) -> String {
    format!("Expected: {:?} Given: {:?}", expected, actual)
}

fn summary_line(summary: &RunSummary) -> String {
    format!("{}/{} tests passed", summary.passed, summary.run)
}

/// Run every case in the suite sequentially and return the tally.
pub fn run_suite(
    suite: &Suite,
    invoker: &dyn Invoker,
    policy: ComparePolicy,
    reporter: &mut dyn Reporter,
) -> Result<RunSummary, RunError> {
    let mut summary = RunSummary::default();

    for case in &suite.cases {
        let started = Instant::now();
        let outcome = run_case(case, invoker, policy)?;

        summary.run += 1;
        if outcome.passed() {
            summary.passed += 1;
        }
        reporter.on_case_finished(&case.name, &outcome, started.elapsed());
    }

    reporter.on_run_finished(&summary);
    reporter.on_excluded(&suite.excluded);
    Ok(summary)
}

/// Drive one case to a terminal outcome.
///
/// The artifact is only invoked after a successful compile.
fn run_case(
    case: &TestCase,
    invoker: &dyn Invoker,
    policy: ComparePolicy,
) -> Result<TestOutcome, RunError> {
    let source = fs::read_to_string(&case.path).map_err(|source| RunError::ReadCase {
        path: case.path.display().to_string(),
        source,
    })?;
    let expected = annotation::expected_output(&source).map_err(|source| RunError::Annotation {
        path: case.path.display().to_string(),
        source,
    })?;

    let compiled = invoker.compile(&case.path)?;
    if !compiled.success {
        return Ok(TestOutcome::CompileFailed {
            stdout: compiled.stdout,
            stderr: compiled.stderr,
        });
    }

    let ran = invoker.run_artifact()?;
    if policy.matches(&expected, &ran.stdout) {
        Ok(TestOutcome::Passed)
    } else {
        Ok(TestOutcome::BehaviorMismatch {
            expected,
            actual: ran.stdout,
        })
    }
}
