//! `tsref sync` command

use anyhow::Result;

use crate::cli::SyncArgs;
use crate::commands::CommandContext;
use tsref::ops::{sync_all, SyncOptions, SyncOutcome};
use tsref::util::shell::Status;

pub fn execute(ctx: &CommandContext, args: SyncArgs) -> Result<()> {
    let ws = ctx.workspace()?;
    let shell = &ctx.shell;

    shell.status(Status::Scanning, ws.root().display());

    let summary = sync_all(
        &ws,
        &SyncOptions {
            dry_run: args.dry_run,
        },
    );
    ctx.emit_skipped(&summary.scan_skipped);

    if summary.reports.is_empty() && summary.failures.is_empty() {
        shell.warn(format!(
            "no TypeScript projects under {}",
            ws.apps_dir().display()
        ));
        return Ok(());
    }

    shell.status(
        Status::Syncing,
        format!("{} project(s)", summary.reports.len() + summary.failures.len()),
    );

    for report in &summary.reports {
        let project = report.project.display();
        match report.outcome {
            SyncOutcome::Updated(count) => {
                shell.status(Status::Updated, format!("{} ({} references)", project, count));
            }
            SyncOutcome::Cleared => {
                shell.status(
                    Status::Unchanged,
                    format!("{} (no workspace references)", project),
                );
            }
            SyncOutcome::Skipped => {
                shell.status(Status::Skipped, format!("{} (missing package.json)", project));
            }
        }
    }
    ctx.emit_skipped(&summary.failures);

    shell.status(
        Status::Finished,
        format!(
            "{} updated, {} unchanged, {} failed",
            summary.updated(),
            summary.unchanged(),
            summary.failures.len()
        ),
    );
    if args.dry_run {
        shell.note("dry run - nothing was written");
    }

    Ok(())
}
