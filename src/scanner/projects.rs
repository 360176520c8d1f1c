//! Project scanner: discovers runnable projects under category trees.

use std::path::Path;

use crate::core::manifest::{self, PackageManifest};
use crate::core::project::{Category, ProjectRecord, TypePolicy};
use crate::core::workspace::Workspace;
use crate::scanner::{sorted_subdirs, ScanDiagnostic, ScanOutcome};

/// Scan every category tree of the workspace.
pub fn scan_projects(ws: &Workspace) -> ScanOutcome<ProjectRecord> {
    let mut out = ScanOutcome::default();
    for category in ws.categories() {
        out.merge(scan_category(ws.root(), category));
    }
    out
}

/// Scan a single category tree rooted at `root/<category.dir>`.
///
/// A missing category root yields an empty outcome.
pub fn scan_category(root: &Path, category: &Category) -> ScanOutcome<ProjectRecord> {
    let mut out = ScanOutcome::default();
    let base = root.join(&category.dir);

    if !base.is_dir() {
        tracing::debug!("category root {} does not exist", base.display());
        return out;
    }

    walk(&base, Path::new(""), category, &mut out);
    out
}

fn walk(dir: &Path, rel: &Path, category: &Category, out: &mut ScanOutcome<ProjectRecord>) {
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

        if !manifest_file.is_file() {
            walk(&path, &rel_path, category, out);
            continue;
        }

        match PackageManifest::load(&manifest_file) {
            Ok(parsed) => {
                let kind = match &category.policy {
                    TypePolicy::Fixed(tag) => tag.clone(),
                    TypePolicy::Inherit { default } => rel
                        .file_name()
                        .map(|parent| parent.to_string_lossy().into_owned())
                        .unwrap_or_else(|| default.clone()),
                };

                let fallback = rel_path.to_string_lossy().into_owned();
                out.records.push(ProjectRecord {
                    name: parsed.name.unwrap_or(fallback),
                    path: Path::new(&category.dir).join(&rel_path),
                    scripts: parsed.scripts,
                    kind,
                });
            }
            // Malformed manifest: no record, no descent below it.
            Err(err) => out.skipped.push(ScanDiagnostic::new(manifest_file, &err)),
        }
    }
}
