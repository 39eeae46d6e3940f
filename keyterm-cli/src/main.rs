//! keyterm command-line entry point

use clap::Parser;
use keyterm_cli::commands::Commands;
use keyterm_cli::CliResult;

/// Rank the compound terms that contain a keyword in large Chinese texts
#[derive(Debug, Parser)]
#[command(name = "keyterm", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> CliResult<()> {
    Cli::parse().command.execute()
}
