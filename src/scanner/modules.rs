//! Module scanner: builds the universe of possible workspace dependencies.

use std::path::Path;

use crate::core::manifest::{self, PackageManifest};
use crate::core::project::ModuleRecord;
use crate::core::workspace::Workspace;
use crate::scanner::{sorted_subdirs, ScanDiagnostic, ScanOutcome};

/// Scan every module root of the workspace (`packages/`, `tools/`, ...).
pub fn scan_all_modules(ws: &Workspace) -> ScanOutcome<ModuleRecord> {
    let mut out = ScanOutcome::default();
    for base in ws.module_roots() {
        out.merge(scan_modules(ws, base));
    }
    out
}

/// Scan one base directory for modules.
///
/// Same recursive descent as the project scanner, without type
/// classification: every directory holding a manifest is a module.
pub fn scan_modules(ws: &Workspace, base: &str) -> ScanOutcome<ModuleRecord> {
    let mut out = ScanOutcome::default();
    let base_dir = ws.root().join(base);

    if !base_dir.is_dir() {
        tracing::debug!("module root {} does not exist", base_dir.display());
        return out;
    }

    walk(&base_dir, Path::new(base), Path::new(""), &mut out);
    out
}

fn walk(dir: &Path, base: &Path, rel: &Path, out: &mut ScanOutcome<ModuleRecord>) {
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
            walk(&path, base, &rel_path, out);
            continue;
        }

        match PackageManifest::load(&manifest_file) {
            Ok(parsed) => {
                let fallback = rel_path.to_string_lossy().into_owned();
                out.records.push(ModuleRecord {
                    name: parsed.name.unwrap_or(fallback),
                    dir: base.join(&rel_path),
                });
            }
            Err(err) => out.skipped.push(ScanDiagnostic::new(manifest_file, &err)),
        }
    }
}
