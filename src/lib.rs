#![forbid(unsafe_code)]
//! outcheck — expected-output test harness for compiler toolchains
//!
//! outcheck drives an external compiler over a directory of test-case
//! source files. Each case declares the stdout it should produce with an
//! embedded `//@out: ` annotation; the harness compiles the case, runs
//! the produced artifact, compares captured output against the decoded
//! expectation, and tallies a pass/fail summary.
//!
//! ## Panic Policy
//!
//! This codebase follows explicit error handling:
//!
//! - **Production code**: Use `Result` or `Option` with `?` / `ok_or` / `map_err`. The `cli` module enforces
//!   `#![deny(clippy::unwrap_used)]`.
//!
//! - **Test code**: `.unwrap()` and `.expect()` are acceptable in tests.

pub mod annotation;
pub mod cli;
pub mod exec;
pub mod runner;
pub mod suite;

pub use annotation::{AnnotationError, expected_output};
pub use exec::{Invoker, ProcessInvoker};
pub use runner::{ComparePolicy, ConsoleReporter, Reporter, RunSummary, TestOutcome, run_suite};
pub use suite::{Suite, TestCase};
