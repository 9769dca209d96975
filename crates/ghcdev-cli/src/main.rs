//! ghcdev - manage from-source GHC builds by git reference.

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod styles;

use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    ghcdev_telemetry::init(cli.global.verbose);

    let exit_code = commands::run(cli).await?;

    std::process::exit(exit_code);
}
