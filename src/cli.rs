// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Single-purpose binary, so flags only - no subcommands.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "apiary")]
#[command(about = "Liveness checks for a fleet of cowrie SSH honeypots")]
#[command(version)]
pub struct Cli {
    /// Path to the configuration file (skips discovery)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}
