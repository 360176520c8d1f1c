//! Implementation of `tsref sync`.
//!
//! Rewrites each TypeScript project's `references` array to exactly the
//! set of declared workspace dependencies that are themselves typed
//! projects. The rewrite is a whole-file overwrite with stable formatting,
//! so re-running against unchanged manifests produces no diff.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::manifest::{self, PackageManifest};
use crate::core::project::ModuleRecord;
use crate::core::tsconfig::{self, Reference, TsConfig};
use crate::core::workspace::Workspace;
use crate::scanner::{self, ScanDiagnostic};
use crate::util::fs::relative_path;

/// Options for reference synchronization.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Compute everything but write nothing.
    pub dry_run: bool,
}

/// What happened to a single project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Manifest or compiler project file missing; nothing written.
    Skipped,

    /// No candidate survived; an empty references list was written to
    /// clear any stale entries. Reported as "unchanged".
    Cleared,

    /// References rewritten with this many entries.
    Updated(usize),
}

impl SyncOutcome {
    /// Whether a non-trivial reference set was written.
    pub fn changed(&self) -> bool {
        matches!(self, SyncOutcome::Updated(_))
    }
}

/// Synchronize one project's references against the candidate modules.
///
/// Candidates survive when their name appears among the project's declared
/// dependencies (runtime, dev, or peer) and their directory carries its
/// own compiler project file. The computed list replaces `references`
/// unconditionally; entries are sorted by path for determinism.
pub fn sync_references(
    ws: &Workspace,
    project_dir: &Path,
    candidates: &[ModuleRecord],
    opts: &SyncOptions,
) -> Result<SyncOutcome> {
    let manifest_file = manifest::manifest_path(project_dir);
    let tsconfig_file = tsconfig::tsconfig_path(project_dir);

    if !manifest_file.is_file() || !tsconfig_file.is_file() {
        return Ok(SyncOutcome::Skipped);
    }

    let parsed = PackageManifest::load(&manifest_file)?;
    let declared = parsed.dependency_names();

    let mut references: Vec<Reference> = candidates
        .iter()
        .filter(|module| declared.contains(module.name.as_str()))
        .filter(|module| {
            // A module without its own compiler project file cannot be
            // referenced as a typed project.
            tsconfig::tsconfig_path(&ws.resolve(&module.dir)).is_file()
        })
        .map(|module| {
            let rel = relative_path(project_dir, &ws.resolve(&module.dir));
            Reference::new(rel.to_string_lossy().into_owned())
        })
        .collect();
    references.sort();

    let mut config = TsConfig::load(&tsconfig_file)?;
    config.set_references(&references);

    if !opts.dry_run {
        config.save(&tsconfig_file)?;
    }

    if references.is_empty() {
        Ok(SyncOutcome::Cleared)
    } else {
        tracing::debug!(
            "{}: {} reference(s)",
            project_dir.display(),
            references.len()
        );
        Ok(SyncOutcome::Updated(references.len()))
    }
}

/// Per-project result within a batch run.
#[derive(Debug)]
pub struct SyncReport {
    /// Project directory, relative to the workspace root.
    pub project: PathBuf,

    /// What happened to it.
    pub outcome: SyncOutcome,
}

/// Result of a batch synchronization.
#[derive(Debug, Default)]
pub struct SyncSummary {
    /// Per-project outcomes, in traversal order.
    pub reports: Vec<SyncReport>,

    /// Projects whose manifest or compiler project file failed to parse.
    pub failures: Vec<ScanDiagnostic>,

    /// Modules skipped while building the candidate universe.
    pub scan_skipped: Vec<ScanDiagnostic>,
}

impl SyncSummary {
    /// Number of projects that received a non-trivial reference set.
    pub fn updated(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.changed()).count()
    }

    /// Number of projects left unchanged (skipped or cleared).
    pub fn unchanged(&self) -> usize {
        self.reports.len() - self.updated()
    }
}

/// Synchronize every TypeScript project under the apps tree.
///
/// The candidate universe is every module under the workspace's module
/// roots, narrowed to the workspace dependency scope when one is
/// derivable. Failure on one project never aborts its siblings.
pub fn sync_all(ws: &Workspace, opts: &SyncOptions) -> SyncSummary {
    let mut summary = SyncSummary::default();

    let targets = scanner::find_ts_projects(&ws.apps_dir());

    let modules = scanner::scan_all_modules(ws);
    summary.scan_skipped = modules.skipped;

    let mut candidates = modules.records;
    if let Some(scope) = ws.scope() {
        let prefix = format!("{}/", scope);
        candidates.retain(|m| m.name.starts_with(&prefix));
    }

    for target in targets {
        let project = relative_path(ws.root(), &target);
        match sync_references(ws, &target, &candidates, opts) {
            Ok(outcome) => summary.reports.push(SyncReport { project, outcome }),
            Err(err) => {
                let diag = ScanDiagnostic::new(target, err.as_ref());
                tracing::warn!("{}", diag);
                summary.failures.push(diag);
            }
        }
    }

    summary
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

    /// A workspace with one web app depending on `@acme/ui` (typed) and
    /// `@acme/assets` (untyped), plus an undeclared `@acme/theme`.
    fn fixture() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();

        write(&root.join("package.json"), r#"{ "name": "@acme/monorepo" }"#);

        write(
            &root.join("apps/web/project/package.json"),
            r#"{
  "name": "@acme/web-app",
  "dependencies": { "@acme/ui": "workspace:*", "react": "^18.0.0" },
  "devDependencies": { "@acme/assets": "workspace:*" }
}"#,
        );
        write(
            &root.join("apps/web/project/tsconfig.json"),
            r#"{ "compilerOptions": { "composite": true }, "references": [{ "path": "../../stale" }] }"#,
        );

        write(&root.join("packages/ui/package.json"), r#"{ "name": "@acme/ui" }"#);
        write(&root.join("packages/ui/tsconfig.json"), "{}");

        // No tsconfig: cannot be referenced.
        write(
            &root.join("packages/assets/package.json"),
            r#"{ "name": "@acme/assets" }"#,
        );

        // Typed but not declared by the app.
        write(
            &root.join("packages/theme/package.json"),
            r#"{ "name": "@acme/theme" }"#,
        );
        write(&root.join("packages/theme/tsconfig.json"), "{}");

        tmp
    }

    #[test]
    fn test_sync_rewrites_references() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        let candidates = scanner::scan_all_modules(&ws).records;
        let project = tmp.path().join("apps/web/project");

        let outcome =
            sync_references(&ws, &project, &candidates, &SyncOptions::default()).unwrap();
        assert_eq!(outcome, SyncOutcome::Updated(1));

        let config = TsConfig::load(&project.join("tsconfig.json")).unwrap();
        let refs = config.references();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].path, "../../../packages/ui");
    }

    #[test]
    fn test_sync_is_idempotent() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        let candidates = scanner::scan_all_modules(&ws).records;
        let project = tmp.path().join("apps/web/project");
        let tsconfig_file = project.join("tsconfig.json");

        sync_references(&ws, &project, &candidates, &SyncOptions::default()).unwrap();
        let first = fs::read_to_string(&tsconfig_file).unwrap();

        sync_references(&ws, &project, &candidates, &SyncOptions::default()).unwrap();
        let second = fs::read_to_string(&tsconfig_file).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_sync_clears_stale_references() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        let project = tmp.path().join("apps/web/project");

        // Empty candidate universe: the stale entry must still go away.
        let outcome = sync_references(&ws, &project, &[], &SyncOptions::default()).unwrap();
        assert_eq!(outcome, SyncOutcome::Cleared);
        assert!(!outcome.changed());

        let config = TsConfig::load(&project.join("tsconfig.json")).unwrap();
        assert!(config.references().is_empty());
    }

    #[test]
    fn test_sync_skips_without_project_files() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        let bare = tmp.path().join("apps/bare");
        fs::create_dir_all(&bare).unwrap();

        let outcome = sync_references(&ws, &bare, &[], &SyncOptions::default()).unwrap();
        assert_eq!(outcome, SyncOutcome::Skipped);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());
        let candidates = scanner::scan_all_modules(&ws).records;
        let project = tmp.path().join("apps/web/project");
        let tsconfig_file = project.join("tsconfig.json");
        let before = fs::read_to_string(&tsconfig_file).unwrap();

        let outcome = sync_references(
            &ws,
            &project,
            &candidates,
            &SyncOptions { dry_run: true },
        )
        .unwrap();
        assert_eq!(outcome, SyncOutcome::Updated(1));
        assert_eq!(fs::read_to_string(&tsconfig_file).unwrap(), before);
    }

    #[test]
    fn test_sync_all_summary() {
        let tmp = fixture();
        let ws = Workspace::new(tmp.path());

        let summary = sync_all(&ws, &SyncOptions::default());
        assert_eq!(summary.reports.len(), 1);
        assert_eq!(summary.updated(), 1);
        assert_eq!(summary.unchanged(), 0);
        assert!(summary.failures.is_empty());
    }

    #[test]
    fn test_sync_all_continues_past_broken_project() {
        let tmp = fixture();
        let root = tmp.path();
        write(&root.join("apps/mobile/brokenApp/package.json"), "{ nope");
        write(&root.join("apps/mobile/brokenApp/tsconfig.json"), "{}");

        let ws = Workspace::new(root);
        let summary = sync_all(&ws, &SyncOptions::default());

        assert_eq!(summary.failures.len(), 1);
        assert!(summary.failures[0].message.contains("failed to parse"));
        // The healthy sibling still synced.
        assert_eq!(summary.updated(), 1);
    }

    #[test]
    fn test_scope_filter_excludes_foreign_modules() {
        let tmp = fixture();
        let root = tmp.path();

        // Declared by the app and typed, but outside the @acme scope.
        write(
            &root.join("packages/react/package.json"),
            r#"{ "name": "react" }"#,
        );
        write(&root.join("packages/react/tsconfig.json"), "{}");

        let ws = Workspace::new(root);
        sync_all(&ws, &SyncOptions::default());

        let config =
            TsConfig::load(&root.join("apps/web/project/tsconfig.json")).unwrap();
        let refs = config.references();
        assert_eq!(refs.len(), 1);
        assert!(refs[0].path.ends_with("packages/ui"));
    }
}
