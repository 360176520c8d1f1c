//! Project and module records produced by the workspace scanners.

use std::path::PathBuf;

use indexmap::IndexMap;
use serde::Serialize;

/// A runnable project discovered under a category tree (apps/, packages/).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectRecord {
    /// Manifest-declared package name, or the relative path if absent.
    pub name: String,

    /// Path relative to the workspace root.
    pub path: PathBuf,

    /// Scripts declared in the manifest, verbatim.
    pub scripts: IndexMap<String, String>,

    /// Category tag inferred at scan time ("app", "web", "package", ...).
    #[serde(rename = "type")]
    pub kind: String,
}

impl ProjectRecord {
    /// Check whether the project declares the given script.
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }
}

/// A workspace module: something that can appear as an in-workspace
/// dependency of a project. No type classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleRecord {
    /// Manifest-declared package name, or the relative path if absent.
    pub name: String,

    /// Path relative to the workspace root, rooted under the scanned base
    /// directory (e.g. `packages/ui`).
    pub dir: PathBuf,
}

/// How a category assigns the `type` tag to discovered projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypePolicy {
    /// Every project gets the same tag (the `packages` tree).
    Fixed(String),

    /// A project directly under the category root gets the default tag;
    /// one nested deeper gets its immediate parent directory's basename,
    /// so `apps/mobile/customerApp` is tagged `mobile`.
    Inherit { default: String },
}

/// A top-level category directory to walk for projects.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    /// Directory name under the workspace root (e.g. `apps`).
    pub dir: String,

    /// Tagging policy for projects found beneath it.
    pub policy: TypePolicy,
}

impl Category {
    /// A category whose projects inherit their parent directory's name.
    pub fn inherit(dir: impl Into<String>, default: impl Into<String>) -> Self {
        Category {
            dir: dir.into(),
            policy: TypePolicy::Inherit {
                default: default.into(),
            },
        }
    }

    /// A category whose projects all share one tag.
    pub fn fixed(dir: impl Into<String>, tag: impl Into<String>) -> Self {
        Category {
            dir: dir.into(),
            policy: TypePolicy::Fixed(tag.into()),
        }
    }
}
