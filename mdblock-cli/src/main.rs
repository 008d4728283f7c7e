//! mdblock command-line entry point

use clap::Parser;
use mdblock_cli::commands::Commands;

/// Segment streamed markdown into renderable blocks
#[derive(Debug, Parser)]
#[command(name = "mdblock", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.command.execute()
}
