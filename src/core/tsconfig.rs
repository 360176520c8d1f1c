//! `tsconfig.json` compiler project files.
//!
//! The compiler project file controls typed compilation scope and carries
//! the `references` array tsref rewrites. Reads are typed; mutation edits
//! the retained JSON document in place so unknown keys and key order
//! survive a rewrite. With `serde_json`'s `preserve_order` feature the
//! serialized form is deterministic: rewriting an unchanged document
//! produces byte-identical output.

use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// File name of the compiler project file.
pub const TSCONFIG_NAME: &str = "tsconfig.json";

/// Errors raised while loading or saving a compiler project file.
#[derive(Debug, Error)]
pub enum TsConfigError {
    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse {}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} is not a JSON object", path.display())]
    NotAnObject { path: PathBuf },

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// A single project reference entry.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Reference {
    /// Path to the referenced project, relative to the referencing file.
    pub path: String,
}

impl Reference {
    pub fn new(path: impl Into<String>) -> Self {
        Reference { path: path.into() }
    }
}

/// A loaded compiler project file.
///
/// The full document is retained as a JSON object; typed accessors read
/// the fields tsref cares about and default the rest.
#[derive(Debug, Clone)]
pub struct TsConfig {
    doc: Map<String, Value>,
}

impl TsConfig {
    /// Load a compiler project file from disk.
    pub fn load(path: &Path) -> Result<Self, TsConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| TsConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse compiler project file content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, TsConfigError> {
        let value: Value =
            serde_json::from_str(content).map_err(|source| TsConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;

        match value {
            Value::Object(doc) => Ok(TsConfig { doc }),
            _ => Err(TsConfigError::NotAnObject {
                path: path.to_path_buf(),
            }),
        }
    }

    /// An empty document, used when aggregating into a root file that does
    /// not exist yet.
    pub fn empty() -> Self {
        TsConfig { doc: Map::new() }
    }

    /// The `references` array, defaulting to empty. Entries that are not
    /// `{ "path": <string> }` objects are ignored.
    pub fn references(&self) -> Vec<Reference> {
        match self.doc.get("references") {
            Some(Value::Array(entries)) => entries
                .iter()
                .filter_map(|entry| {
                    entry
                        .get("path")
                        .and_then(Value::as_str)
                        .map(Reference::new)
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// The `files` list, if present.
    pub fn files(&self) -> Option<Vec<String>> {
        match self.doc.get("files") {
            Some(Value::Array(entries)) => Some(
                entries
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect(),
            ),
            _ => None,
        }
    }

    /// `compilerOptions.composite`, defaulting to `true` when absent.
    pub fn is_composite(&self) -> bool {
        self.doc
            .get("compilerOptions")
            .and_then(|opts| opts.get("composite"))
            .and_then(Value::as_bool)
            .unwrap_or(true)
    }

    /// Replace the `references` array. An existing key keeps its position
    /// in the document; a new key is appended.
    pub fn set_references(&mut self, references: &[Reference]) {
        let entries: Vec<Value> = references
            .iter()
            .map(|r| {
                let mut obj = Map::new();
                obj.insert("path".to_string(), Value::String(r.path.clone()));
                Value::Object(obj)
            })
            .collect();

        self.doc
            .insert("references".to_string(), Value::Array(entries));
    }

    /// Clear the `files` list to an empty array.
    pub fn clear_files(&mut self) {
        self.doc.insert("files".to_string(), Value::Array(Vec::new()));
    }

    /// Serialize with stable formatting: insertion-ordered keys, two-space
    /// indent, trailing newline.
    pub fn to_pretty_string(&self) -> String {
        let mut out = serde_json::to_string_pretty(&Value::Object(self.doc.clone()))
            .expect("tsconfig document serializes");
        out.push('\n');
        out
    }

    /// Write the document back to disk as a single whole-file overwrite.
    pub fn save(&self, path: &Path) -> Result<(), TsConfigError> {
        std::fs::write(path, self.to_pretty_string()).map_err(|source| TsConfigError::Write {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Path of the compiler project file inside a project directory.
pub fn tsconfig_path(dir: &Path) -> PathBuf {
    dir.join(TSCONFIG_NAME)
}
