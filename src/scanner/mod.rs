//! Workspace scanners.
//!
//! Recursive-descent discovery of projects and modules. A directory
//! containing a package manifest is a leaf: it is recorded and never
//! descended into. Directory entries are visited in lexicographic order so
//! scan results are deterministic. Dot-directories and `node_modules` are
//! never walked.
//!
//! Scanning is read-only. A manifest that fails to parse excludes its
//! directory from the results and is reported as a [`ScanDiagnostic`]
//! rather than an error; the scan over the remaining tree continues.

pub mod modules;
pub mod projects;
pub mod ts;

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};

pub use modules::{scan_all_modules, scan_modules};
pub use projects::{scan_category, scan_projects};
pub use ts::find_ts_projects;

/// A project or module skipped during a scan, with the reason.
#[derive(Debug, Clone)]
pub struct ScanDiagnostic {
    /// The file that could not be processed.
    pub path: PathBuf,

    /// Human-readable reason, including the parse error.
    pub message: String,
}

impl ScanDiagnostic {
    /// Build a diagnostic from an error, flattening its source chain.
    pub fn new(path: impl Into<PathBuf>, err: &dyn std::error::Error) -> Self {
        let mut message = err.to_string();
        let mut source = err.source();
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }

        ScanDiagnostic {
            path: path.into(),
            message,
        }
    }
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "skipped {}: {}", self.path.display(), self.message)
    }
}

/// Result of a scan: the discovered records plus everything skipped.
#[derive(Debug, Clone)]
pub struct ScanOutcome<T> {
    /// Discovered records, in traversal order.
    pub records: Vec<T>,

    /// Directories skipped because their manifest was unreadable or
    /// malformed.
    pub skipped: Vec<ScanDiagnostic>,
}

impl<T> Default for ScanOutcome<T> {
    fn default() -> Self {
        ScanOutcome {
            records: Vec::new(),
            skipped: Vec::new(),
        }
    }
}

impl<T> ScanOutcome<T> {
    /// Fold another outcome into this one.
    pub fn merge(&mut self, other: ScanOutcome<T>) {
        self.records.extend(other.records);
        self.skipped.extend(other.skipped);
    }

    /// True when the scan found no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Subdirectories of `dir` in lexicographic name order, skipping
/// dot-directories and `node_modules`.
pub(crate) fn sorted_subdirs(dir: &Path) -> io::Result<Vec<(String, PathBuf)>> {
    let mut subdirs = Vec::new();

    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') || name == "node_modules" {
            continue;
        }

        subdirs.push((name, path));
    }

    subdirs.sort();
    Ok(subdirs)
}
