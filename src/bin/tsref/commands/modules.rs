//! `tsref modules` command

use anyhow::Result;

use crate::cli::ModulesArgs;
use crate::commands::CommandContext;
use tsref::scanner::scan_all_modules;

pub fn execute(ctx: &CommandContext, args: ModulesArgs) -> Result<()> {
    let ws = ctx.workspace()?;

    let outcome = scan_all_modules(&ws);
    ctx.emit_skipped(&outcome.skipped);

    if outcome.records.is_empty() {
        ctx.shell.warn(format!(
            "no workspace modules under {} (checked {})",
            ws.root().display(),
            ws.module_roots().join(", ")
        ));
        return Ok(());
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome.records)?);
        return Ok(());
    }

    for module in &outcome.records {
        println!("{} ({})", module.name, module.dir.display());
    }

    Ok(())
}
