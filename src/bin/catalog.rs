//! Catalog CLI Binary

use anyhow::Context;
use catalog::logging::init_logging;
use catalog::tooling::{Cli, CliContext};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = cli.resolve_config().context("loading configuration")?;
    init_logging(&config.logging).context("initializing logging")?;

    let context = CliContext::new(config).context("opening catalog store")?;
    let output = context.execute(&cli.command)?;
    println!("{}", output);
    Ok(())
}
