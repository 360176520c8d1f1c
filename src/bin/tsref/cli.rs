//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// tsref - scan a pnpm monorepo and keep TypeScript project references in sync
#[derive(Parser)]
#[command(name = "tsref")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Workspace root (defaults to the nearest ancestor directory containing package.json)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress status output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List runnable projects discovered under the category trees
    List(ListArgs),

    /// List workspace modules (possible in-workspace dependencies)
    Modules(ModulesArgs),

    /// Rewrite tsconfig references for every TypeScript project under apps/
    Sync(SyncArgs),

    /// Aggregate composite packages into the root tsconfig.json
    Root(RootArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

#[derive(Args)]
pub struct ListArgs {
    /// Only projects declaring this script
    #[arg(long)]
    pub script: Option<String>,

    /// Only projects with this type tag (app, web, package, ...)
    #[arg(long = "type")]
    pub kind: Option<String>,

    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct ModulesArgs {
    /// Emit machine-readable JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct SyncArgs {
    /// Compute references without writing anything
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct RootArgs {
    /// Package names to aggregate, comma separated (defaults to all discovered)
    #[arg(long, value_delimiter = ',')]
    pub select: Vec<String>,

    /// Show the would-be reference list without writing
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
