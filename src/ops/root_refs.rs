//! Implementation of `tsref root`.
//!
//! Aggregates composite packages into the root `tsconfig.json`. The root
//! file is a pure reference aggregator: its `files` list is cleared and
//! its `references` list becomes exactly the selected set, sorted by
//! path, so the file never acts as a compilation unit itself.

use std::path::Path;

use anyhow::Result;

use crate::core::manifest::{self, PackageManifest};
use crate::core::tsconfig::{self, Reference, TsConfig};
use crate::core::workspace::Workspace;
use crate::scanner::{sorted_subdirs, ScanDiagnostic, ScanOutcome};

/// A package eligible for root aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RootProject {
    /// Manifest-declared name, or the relative path if absent.
    pub name: String,

    /// Aggregator path, always slash-separated and rooted at the
    /// workspace (e.g. `./packages/ui`).
    pub path: String,
}

/// Options for root aggregation.
#[derive(Debug, Clone, Default)]
pub struct RootRefsOptions {
    /// Compute the would-be list without writing.
    pub dry_run: bool,
}

/// The computed root reference list.
#[derive(Debug)]
pub struct RootRefsPlan {
    /// References in their final (sorted) order.
    pub references: Vec<Reference>,

    /// Whether the root file was actually written.
    pub written: bool,
}

/// Discover packages eligible for root aggregation.
///
/// A directory is eligible when it holds both a package manifest and a
/// compiler project file whose `compilerOptions.composite` is not
/// `false`. Directories missing either file are walked deeper. Parse
/// failures become diagnostics, not errors.
pub fn collect_composite_projects(ws: &Workspace) -> ScanOutcome<RootProject> {
    let mut out = ScanOutcome::default();
    for base in ws.module_roots() {
        let base_dir = ws.root().join(base);
        if !base_dir.is_dir() {
            continue;
        }
        walk(&base_dir, base, Path::new(""), &mut out);
    }
    out
}

fn walk(dir: &Path, base: &str, rel: &Path, out: &mut ScanOutcome<RootProject>) {
    let subdirs = match sorted_subdirs(dir) {
        Ok(subdirs) => subdirs,
        Err(err) => {
            out.skipped.push(ScanDiagnostic::new(dir, &err));
            return;
        }
    };

    for (name, path) in subdirs {
        let rel_path = rel.join(&name);
        let manifest_file = manifest::manifest_path(&path);
        let tsconfig_file = tsconfig::tsconfig_path(&path);

        if !manifest_file.is_file() || !tsconfig_file.is_file() {
            walk(&path, base, &rel_path, out);
            continue;
        }

        let parsed = match PackageManifest::load(&manifest_file) {
            Ok(parsed) => parsed,
            Err(err) => {
                out.skipped.push(ScanDiagnostic::new(manifest_file, &err));
                continue;
            }
        };

        let config = match TsConfig::load(&tsconfig_file) {
            Ok(config) => config,
            Err(err) => {
                out.skipped.push(ScanDiagnostic::new(tsconfig_file, &err));
                continue;
            }
        };

        if !config.is_composite() {
            tracing::debug!("{} is not composite, skipping", path.display());
            continue;
        }

        let fallback = rel_path.to_string_lossy().into_owned();
        out.records.push(RootProject {
            name: parsed.name.unwrap_or(fallback),
            path: aggregator_path(base, &rel_path),
        });
    }
}

/// Build the `./base/rel` aggregator path with forward slashes.
fn aggregator_path(base: &str, rel: &Path) -> String {
    let mut path = format!("./{}", base);
    for component in rel.components() {
        path.push('/');
        path.push_str(&component.as_os_str().to_string_lossy());
    }
    path
}

/// Rewrite the root compiler project file as a reference aggregator over
/// `selected`. Creates the file if absent; idempotent under identical
/// input. The plan is returned either way so dry runs can display it.
pub fn update_root_references(
    ws: &Workspace,
    selected: &[RootProject],
    opts: &RootRefsOptions,
) -> Result<RootRefsPlan> {
    let mut references: Vec<Reference> = selected
        .iter()
        .map(|p| Reference::new(p.path.clone()))
        .collect();
    references.sort();

    let path = ws.root_tsconfig_path();
    let mut config = if path.is_file() {
        TsConfig::load(&path)?
    } else {
        TsConfig::empty()
    };

    config.clear_files();
    config.set_references(&references);

    let written = if opts.dry_run {
        false
    } else {
        config.save(&path)?;
        true
    };

    Ok(RootRefsPlan {
        references,
        written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        write(&root.join("packages/ui/package.json"), r#"{ "name": "@acme/ui" }"#);
        write(&root.join("packages/ui/tsconfig.json"), "{}");

        write(
            &root.join("packages/theme/package.json"),
            r#"{ "name": "@acme/theme" }"#,
        );
        write(
            &root.join("packages/theme/tsconfig.json"),
            r#"{ "compilerOptions": { "composite": false } }"#,
        );

        write(
            &root.join("packages/assets/fonts/package.json"),
            r#"{ "name": "@acme/fonts" }"#,
        );
        write(&root.join("packages/assets/fonts/tsconfig.json"), "{}");

        tmp
    }

    #[test]
    fn test_collect_composite_projects() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());

        let outcome = collect_composite_projects(&ws);
        let paths: Vec<&str> = outcome.records.iter().map(|p| p.path.as_str()).collect();
        assert_eq!(paths, ["./packages/assets/fonts", "./packages/ui"]);
        assert!(outcome.skipped.is_empty());
    }

    #[test]
    fn test_collect_reports_parse_failures() {
        let tmp = fixture();
        write(&tmp.path().join("packages/broken/package.json"), "{ nope");
        write(&tmp.path().join("packages/broken/tsconfig.json"), "{}");

        let outcome = collect_composite_projects(&Workspace::new(tmp.path()));
        assert_eq!(outcome.skipped.len(), 1);
        assert_eq!(outcome.records.len(), 2);
    }

    #[test]
    fn test_update_root_references_sorted() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());

        let selected = vec![
            RootProject {
                name: "@acme/ui".to_string(),
                path: "./packages/ui".to_string(),
            },
            RootProject {
                name: "@acme/fonts".to_string(),
                path: "./packages/assets/fonts".to_string(),
            },
        ];

        let plan =
            update_root_references(&ws, &selected, &RootRefsOptions::default()).unwrap();
        assert!(plan.written);
        assert_eq!(plan.references[0].path, "./packages/assets/fonts");
        assert_eq!(plan.references[1].path, "./packages/ui");

        let config = TsConfig::load(&ws.root_tsconfig_path()).unwrap();
        assert_eq!(config.files(), Some(Vec::new()));
        assert_eq!(config.references().len(), 2);
        assert_eq!(config.references()[0].path, "./packages/assets/fonts");
    }

    #[test]
    fn test_update_root_references_idempotent() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        let selected = collect_composite_projects(&ws).records;

        update_root_references(&ws, &selected, &RootRefsOptions::default()).unwrap();
        let first = fs::read_to_string(ws.root_tsconfig_path()).unwrap();

        update_root_references(&ws, &selected, &RootRefsOptions::default()).unwrap();
        let second = fs::read_to_string(ws.root_tsconfig_path()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_update_root_references_clears_existing_files() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        write(
            &ws.root_tsconfig_path(),
            r#"{ "files": ["src/index.ts"], "compilerOptions": { "strict": true } }"#,
        );

        let selected = collect_composite_projects(&ws).records;
        update_root_references(&ws, &selected, &RootRefsOptions::default()).unwrap();

        let config = TsConfig::load(&ws.root_tsconfig_path()).unwrap();
        assert_eq!(config.files(), Some(Vec::new()));
        // Unrelated keys survive the rewrite.
        assert!(config.to_pretty_string().contains("strict"));
    }

    #[test]
    fn test_dry_run_returns_plan_without_writing() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        let selected = collect_composite_projects(&ws).records;

        let plan =
            update_root_references(&ws, &selected, &RootRefsOptions { dry_run: true }).unwrap();
        assert!(!plan.written);
        assert_eq!(plan.references.len(), 2);
        assert!(!ws.root_tsconfig_path().exists());
    }
}
