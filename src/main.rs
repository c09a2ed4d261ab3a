//! nova-analytics - analytics event recorder
//!
//! Main binary entry point for the command-line interface.

use anyhow::Context;
use clap::Parser;
use nova_analytics::cli::{plugins, record, Cli, Commands};
use nova_analytics::AnalyticsCategory;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.init_logging()?;

    let config = cli.load_config().context("failed to load analytics configuration")?;
    let (analytics, registry) =
        AnalyticsCategory::from_config(&config).context("failed to set up analytics plugins")?;

    match cli.command {
        Commands::Record(args) => record::run(args, &analytics, &registry)?,
        Commands::Plugins(args) => plugins::run(args, &registry)?,
    }

    Ok(())
}
