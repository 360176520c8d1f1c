//! `tsref list` command

use anyhow::Result;

use crate::cli::ListArgs;
use crate::commands::CommandContext;
use tsref::scanner::scan_projects;
use tsref::util::diagnostic::NoProjectsError;

pub fn execute(ctx: &CommandContext, args: ListArgs) -> Result<()> {
    let ws = ctx.workspace()?;

    let outcome = scan_projects(&ws);
    ctx.emit_skipped(&outcome.skipped);

    let mut projects = outcome.records;
    if let Some(ref script) = args.script {
        projects.retain(|p| p.has_script(script));
    }
    if let Some(ref kind) = args.kind {
        projects.retain(|p| &p.kind == kind);
    }

    if projects.is_empty() {
        return Err(NoProjectsError {
            dir: ws.root().to_path_buf(),
        }
        .into());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    for project in &projects {
        println!(
            "[{}] {} ({})",
            project.kind,
            project.name,
            project.path.display()
        );
    }

    Ok(())
}
