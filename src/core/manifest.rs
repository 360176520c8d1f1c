//! `package.json` manifest parsing and schema.
//!
//! The manifest is the per-project metadata file declaring the package
//! name, runnable scripts, and dependencies. Only the fields tsref cares
//! about are modeled; unknown keys are ignored.

use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

/// File name of the package manifest.
pub const MANIFEST_NAME: &str = "package.json";

/// Errors raised while loading a manifest.
///
/// `Io` and `Parse` are kept distinct so scanners can tell "unreadable"
/// apart from "malformed" in their diagnostics.
#[derive(Debug, Error)]
pub enum ManifestError {
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
}

/// The parsed `package.json` manifest.
///
/// Every field is optional in the file; absent mappings default to empty
/// so callers never probe for presence.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Declared package name (e.g. `@acme/ui`). Optional.
    #[serde(default)]
    pub name: Option<String>,

    /// Script name to command string, verbatim from the manifest.
    #[serde(default)]
    pub scripts: IndexMap<String, String>,

    /// Runtime dependencies (name to version constraint).
    #[serde(default)]
    pub dependencies: IndexMap<String, String>,

    /// Development dependencies.
    #[serde(default)]
    pub dev_dependencies: IndexMap<String, String>,

    /// Peer dependencies.
    #[serde(default)]
    pub peer_dependencies: IndexMap<String, String>,
}

impl PackageManifest {
    /// Load a manifest from a file path.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::parse(&content, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        serde_json::from_str(content).map_err(|source| ManifestError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Union of declared dependency names across the runtime, dev, and
    /// peer sections.
    pub fn dependency_names(&self) -> BTreeSet<&str> {
        self.dependencies
            .keys()
            .chain(self.dev_dependencies.keys())
            .chain(self.peer_dependencies.keys())
            .map(String::as_str)
            .collect()
    }

    /// Check whether the manifest declares a script with the given name.
    pub fn has_script(&self, name: &str) -> bool {
        self.scripts.contains_key(name)
    }
}

/// Path of the manifest file inside a project directory.
pub fn manifest_path(dir: &Path) -> PathBuf {
    dir.join(MANIFEST_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_manifest() {
        let content = r#"{
            "name": "@acme/web-app",
            "version": "1.0.0",
            "scripts": { "build": "tsc -b", "dev": "vite" },
            "dependencies": { "@acme/ui": "workspace:*", "react": "^18.0.0" },
            "devDependencies": { "@acme/configs": "workspace:*" },
            "peerDependencies": { "react-dom": "^18.0.0" }
        }"#;

        let manifest = PackageManifest::parse(content, Path::new("package.json")).unwrap();
        assert_eq!(manifest.name.as_deref(), Some("@acme/web-app"));
        assert!(manifest.has_script("build"));
        assert!(!manifest.has_script("test"));

        let names = manifest.dependency_names();
        assert_eq!(names.len(), 4);
        assert!(names.contains("@acme/ui"));
        assert!(names.contains("@acme/configs"));
        assert!(names.contains("react-dom"));
    }

    #[test]
    fn test_parse_minimal_manifest() {
        let manifest = PackageManifest::parse("{}", Path::new("package.json")).unwrap();
        assert!(manifest.name.is_none());
        assert!(manifest.scripts.is_empty());
        assert!(manifest.dependency_names().is_empty());
    }

    #[test]
    fn test_parse_malformed_manifest() {
        let result = PackageManifest::parse("{ not json", Path::new("pkg/package.json"));
        match result {
            Err(ManifestError::Parse { path, .. }) => {
                assert_eq!(path, Path::new("pkg/package.json"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_dependency_names_dedup_across_sections() {
        let content = r#"{
            "dependencies": { "@acme/ui": "workspace:*" },
            "devDependencies": { "@acme/ui": "workspace:*" }
        }"#;

        let manifest = PackageManifest::parse(content, Path::new("package.json")).unwrap();
        assert_eq!(manifest.dependency_names().len(), 1);
    }

    #[test]
    fn test_load_missing_manifest_is_io_error() {
        let result = PackageManifest::load(Path::new("/nonexistent/package.json"));
        assert!(matches!(result, Err(ManifestError::Io { .. })));
    }
}
