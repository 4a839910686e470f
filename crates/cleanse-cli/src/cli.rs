use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cleanse")]
#[command(about = "Scrub sensitive files from a public mirror", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Overwrite each target with the banner, keeping its line count
    Run(RunArgs),

    /// Show the resolved targets without touching them
    List(TargetArgs),

    /// Create cleanse.toml in the current directory
    Init,

    /// Print shell completions
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
}

#[derive(Args)]
pub struct TargetArgs {
    /// Files to redact (default: targets from cleanse.toml)
    pub files: Vec<String>,

    /// Directory the targets are relative to (default: config root, "src")
    #[arg(long)]
    pub root: Option<PathBuf>,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub targets: TargetArgs,

    /// Report what would be cleansed without writing
    #[arg(long)]
    pub dry_run: bool,

    /// Abort the batch on the first missing file
    #[arg(long, conflicts_with = "skip_missing")]
    pub fail_fast: bool,

    /// Report missing files and keep going
    #[arg(long)]
    pub skip_missing: bool,

    /// Print the run report as JSON
    #[arg(long)]
    pub json: bool,
}
