//! Discovery of TypeScript project directories (sync targets).

use std::path::{Path, PathBuf};

use crate::core::tsconfig;

/// Mobile platform build trees; never TypeScript projects themselves.
const IGNORED_DIRS: [&str; 2] = ["ios", "android"];

/// Collect every directory under `root` that holds a `tsconfig.json`,
/// stopping at each hit (a nested project inside another project's tree is
/// the outer project's concern). Returns absolute paths in traversal
/// order; a missing root yields an empty list.
pub fn find_ts_projects(root: &Path) -> Vec<PathBuf> {
    let mut found = Vec::new();
    if root.is_dir() {
        walk(root, &mut found);
    }
    found
}

fn walk(dir: &Path, found: &mut Vec<PathBuf>) {
    let subdirs = match crate::scanner::sorted_subdirs(dir) {
        Ok(subdirs) => subdirs,
        Err(err) => {
            tracing::warn!("could not read {}: {}", dir.display(), err);
            return;
        }
    };

    for (name, path) in subdirs {
        if IGNORED_DIRS.contains(&name.as_str()) {
            continue;
        }

        if tsconfig::tsconfig_path(&path).is_file() {
            found.push(path);
        } else {
            walk(&path, found);
        }
    }
}
