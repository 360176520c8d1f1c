//! Command implementations

pub mod completions;
pub mod list;
pub mod modules;
pub mod root;
pub mod sync;

use std::path::PathBuf;

use anyhow::{ensure, Context, Result};

use tsref::core::workspace::Workspace;
use tsref::scanner::ScanDiagnostic;
use tsref::util::diagnostic::{self, Diagnostic};
use tsref::util::shell::Shell;

/// Shared command state: the output shell and workspace root resolution.
pub struct CommandContext {
    pub shell: Shell,
    root_override: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(shell: Shell, root_override: Option<PathBuf>) -> Self {
        CommandContext {
            shell,
            root_override,
        }
    }

    /// Resolve the workspace: an explicit `--root`, or the nearest
    /// ancestor of the current directory holding a `package.json`, or the
    /// current directory itself.
    pub fn workspace(&self) -> Result<Workspace> {
        let root = match &self.root_override {
            Some(root) => {
                ensure!(
                    root.is_dir(),
                    "workspace root {} is not a directory",
                    root.display()
                );
                root.clone()
            }
            None => {
                let cwd = std::env::current_dir().context("failed to get current directory")?;
                Workspace::find_root(&cwd).unwrap_or(cwd)
            }
        };

        Ok(Workspace::new(root))
    }

    /// Print scanner skip diagnostics as warnings.
    pub fn emit_skipped(&self, skipped: &[ScanDiagnostic]) {
        for diag in skipped {
            diagnostic::emit(
                &Diagnostic::warning(diag.message.as_str()).with_location(&diag.path),
                self.shell.use_color(),
            );
        }
    }
}
