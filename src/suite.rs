//! Test-suite enumeration.
//!
//! Two selection modes, mirroring the two ways a test directory can be
//! organized:
//!
//! - **Directory mode**: every entry of the directory is a test case,
//!   sorted by file name so repeated runs visit cases in a stable order.
//! - **Manifest mode**: a file named `index` inside the directory lists
//!   one test-case file name per line and defines both membership and run
//!   order. Directory entries the manifest leaves out are collected as
//!   `excluded` and reported, never run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// File name of the manifest inside a test directory.
pub const MANIFEST_NAME: &str = "index";

/// Errors raised while enumerating a suite.
///
/// These are environment errors: they abort the whole run rather than
/// failing a single test case.
#[derive(Debug, Error)]
pub enum SuiteError {
    #[error("cannot read test directory '{dir}': {source}")]
    ReadDir { dir: String, source: io::Error },

    #[error("cannot read manifest '{path}': {source}")]
    ReadManifest { path: String, source: io::Error },
}

/// A single test case, identified by its file name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestCase {
    /// File name within the test directory.
    pub name: String,
    /// Full path to the source file.
    pub path: PathBuf,
}

/// An enumerated suite: the cases to run, in order, plus any directory
/// entries the manifest left out.
#[derive(Debug)]
pub struct Suite {
    pub cases: Vec<TestCase>,
    /// Entries present in the directory but not named by the manifest.
    /// Always empty in directory mode.
    pub excluded: Vec<String>,
}

/// Enumerate every entry of `dir` as a test case.
///
/// No filtering and no recursion: whatever is in the directory is a test
/// case. Entries are sorted by name.
pub fn from_directory(dir: &Path) -> Result<Suite, SuiteError> {
    let names = list_entries(dir)?;
    tracing::debug!("discovered {} entries in {}", names.len(), dir.display());

    let cases = names
        .into_iter()
        .map(|name| TestCase {
            path: dir.join(&name),
            name,
        })
        .collect();

    Ok(Suite {
        cases,
        excluded: Vec::new(),
    })
}

/// Enumerate the suite named by the `index` manifest inside `dir`.
///
/// Manifest order is run order. The manifest file itself never counts as
/// a test case or as an excluded entry.
pub fn from_manifest(dir: &Path) -> Result<Suite, SuiteError> {
    let manifest_path = dir.join(MANIFEST_NAME);
    let manifest = fs::read_to_string(&manifest_path).map_err(|source| SuiteError::ReadManifest {
        path: manifest_path.display().to_string(),
        source,
    })?;

    let listed: Vec<String> = manifest
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let present = list_entries(dir)?;
    for name in &listed {
        if !present.contains(name) {
            tracing::warn!("manifest names '{}' which is not present in {}", name, dir.display());
        }
    }

    let excluded: Vec<String> = present
        .into_iter()
        .filter(|name| name != MANIFEST_NAME && !listed.contains(name))
        .collect();

    let cases = listed
        .into_iter()
        .map(|name| TestCase {
            path: dir.join(&name),
            name,
        })
        .collect();

    Ok(Suite { cases, excluded })
}

/// List the file names in `dir`, sorted.
fn list_entries(dir: &Path) -> Result<Vec<String>, SuiteError> {
    let read_dir = fs::read_dir(dir).map_err(|source| SuiteError::ReadDir {
        dir: dir.display().to_string(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|source| SuiteError::ReadDir {
            dir: dir.display().to_string(),
            source,
        })?;
        names.push(entry.file_name().to_string_lossy().to_string());
    }

    names.sort();
    Ok(names)
}
