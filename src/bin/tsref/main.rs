//! tsref CLI - workspace scanning and TypeScript project-reference sync

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};
use commands::CommandContext;
use tsref::util::shell::{ColorChoice, Shell};

fn main() {
    if let Err(e) = run() {
        eprintln!("error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    // Parse CLI
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose {
        EnvFilter::new("tsref=debug")
    } else {
        EnvFilter::new("tsref=info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .without_time()
        .init();

    let color = if cli.no_color {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let shell = Shell::from_flags(cli.quiet, cli.verbose, color);
    let ctx = CommandContext::new(shell, cli.root.clone());

    // Execute command
    match cli.command {
        Commands::List(args) => commands::list::execute(&ctx, args),
        Commands::Modules(args) => commands::modules::execute(&ctx, args),
        Commands::Sync(args) => commands::sync::execute(&ctx, args),
        Commands::Root(args) => commands::root::execute(&ctx, args),
        Commands::Completions(args) => commands::completions::execute(args),
    }
}
