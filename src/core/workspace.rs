//! Workspace - central configuration hub.
//!
//! A Workspace names the monorepo root and the directory trees the
//! scanners walk. The root is always an explicit input; nothing in the
//! library reads the process working directory.

use std::path::{Path, PathBuf};

use crate::core::manifest::{self, PackageManifest, MANIFEST_NAME};
use crate::core::project::Category;
use crate::core::tsconfig;

/// A monorepo workspace rooted at a directory.
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Workspace root directory
    root: PathBuf,

    /// Category trees scanned for runnable projects
    categories: Vec<Category>,

    /// Directory name of the tree holding sync targets (TypeScript apps)
    app_root: String,

    /// Base directories scanned for workspace modules
    module_roots: Vec<String>,
}

impl Workspace {
    /// Create a workspace with the conventional pnpm monorepo layout:
    /// `apps/` (inferred types) and `packages/` (fixed `package` tag) as
    /// project categories, `packages/` and `tools/` as module roots.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Workspace {
            root: root.into(),
            categories: vec![
                Category::inherit("apps", "app"),
                Category::fixed("packages", "package"),
            ],
            app_root: "apps".to_string(),
            module_roots: vec!["packages".to_string(), "tools".to_string()],
        }
    }

    /// Override the category trees.
    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    /// Override the module roots.
    pub fn with_module_roots(mut self, module_roots: Vec<String>) -> Self {
        self.module_roots = module_roots;
        self
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the category trees.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Get the directory holding sync targets.
    pub fn apps_dir(&self) -> PathBuf {
        self.root.join(&self.app_root)
    }

    /// Get the module roots.
    pub fn module_roots(&self) -> &[String] {
        &self.module_roots
    }

    /// Get the root manifest path.
    pub fn root_manifest_path(&self) -> PathBuf {
        manifest::manifest_path(&self.root)
    }

    /// Get the root compiler project file path.
    pub fn root_tsconfig_path(&self) -> PathBuf {
        tsconfig::tsconfig_path(&self.root)
    }

    /// Resolve a workspace-relative directory to an absolute path.
    pub fn resolve(&self, dir: &Path) -> PathBuf {
        self.root.join(dir)
    }

    /// Derive the dependency scope from the root manifest's `name`:
    /// `@acme/root` yields `@acme`, a bare `acme` yields `@acme`. A
    /// missing, malformed, or nameless root manifest yields `None`.
    pub fn scope(&self) -> Option<String> {
        let manifest = PackageManifest::load(&self.root_manifest_path()).ok()?;
        let name = manifest.name?;

        if let Some(rest) = name.strip_prefix('@') {
            let scope = rest.split('/').next().unwrap_or(rest);
            Some(format!("@{}", scope))
        } else {
            Some(format!("@{}", name))
        }
    }

    /// Find the workspace root by walking upward from `start` to the
    /// nearest directory containing a `package.json`.
    pub fn find_root(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            if current.join(MANIFEST_NAME).is_file() {
                return Some(current);
            }
            if !current.pop() {
                return None;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let ws = Workspace::new("/repo");
        assert_eq!(ws.root(), Path::new("/repo"));
        assert_eq!(ws.apps_dir(), Path::new("/repo/apps"));
        assert_eq!(ws.module_roots(), ["packages", "tools"]);
        assert_eq!(ws.categories().len(), 2);
    }

    #[test]
    fn test_scope_from_scoped_name() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("package.json"),
            r#"{ "name": "@acme/root" }"#,
        )
        .unwrap();

        let ws = Workspace::new(tmp.path());
        assert_eq!(ws.scope().as_deref(), Some("@acme"));
    }

    #[test]
    fn test_scope_from_bare_name() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), r#"{ "name": "acme" }"#).unwrap();

        let ws = Workspace::new(tmp.path());
        assert_eq!(ws.scope().as_deref(), Some("@acme"));
    }

    #[test]
    fn test_scope_absent() {
        let tmp = TempDir::new().unwrap();

        // No root manifest at all.
        let ws = Workspace::new(tmp.path());
        assert_eq!(ws.scope(), None);

        // Nameless manifest.
        std::fs::write(tmp.path().join("package.json"), "{}").unwrap();
        assert_eq!(ws.scope(), None);

        // Malformed manifest.
        std::fs::write(tmp.path().join("package.json"), "not json").unwrap();
        assert_eq!(ws.scope(), None);
    }

    #[test]
    fn test_find_root() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("package.json"), "{}").unwrap();
        let nested = tmp.path().join("apps/web/project");
        std::fs::create_dir_all(&nested).unwrap();

        let found = Workspace::find_root(&nested).unwrap();
        assert_eq!(found, tmp.path());
    }

    #[test]
    fn test_find_root_none() {
        assert_eq!(Workspace::find_root(Path::new("/nonexistent/nowhere")), None);
    }
}
