//! `tsref root` command

use anyhow::Result;

use crate::cli::RootArgs;
use crate::commands::CommandContext;
use tsref::ops::{collect_composite_projects, update_root_references, RootRefsOptions};
use tsref::util::diagnostic::UnknownSelectionError;
use tsref::util::shell::Status;

pub fn execute(ctx: &CommandContext, args: RootArgs) -> Result<()> {
    let ws = ctx.workspace()?;
    let shell = &ctx.shell;

    let outcome = collect_composite_projects(&ws);
    ctx.emit_skipped(&outcome.skipped);

    if outcome.records.is_empty() {
        shell.warn(format!(
            "no composite packages under {}",
            ws.root().display()
        ));
        return Ok(());
    }

    let selected = if args.select.is_empty() {
        outcome.records
    } else {
        let mut selected = Vec::new();
        for name in &args.select {
            match outcome.records.iter().find(|p| &p.name == name) {
                Some(project) => selected.push(project.clone()),
                None => {
                    let available = outcome
                        .records
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ");
                    return Err(UnknownSelectionError {
                        name: name.clone(),
                        available: Some(format!("available packages: {}", available)),
                    }
                    .into());
                }
            }
        }
        selected
    };

    let plan = update_root_references(
        &ws,
        &selected,
        &RootRefsOptions {
            dry_run: args.dry_run,
        },
    )?;

    if args.dry_run {
        shell.note("dry run - the root tsconfig.json would reference:");
        for reference in &plan.references {
            println!("  {}", reference.path);
        }
    } else {
        shell.status(
            Status::Updated,
            format!(
                "{} ({} references)",
                ws.root_tsconfig_path().display(),
                plan.references.len()
            ),
        );
    }

    Ok(())
}
