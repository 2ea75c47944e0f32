use clap::Parser;
use stash_cli::{StashCli, logging};
use stash_core::StashConfig;
use tracing::{info, warn};

fn main() -> anyhow::Result<()> {
    let cli = StashCli::parse();

    let (config, config_error) = StashConfig::from_environment_or_default();

    logging::init_tracing(&config, cli.verbose)?;
    if let Some(err) = config_error {
        warn!(error = %err, category = err.category(), "Invalid configuration, using defaults");
    }

    info!(version = env!("CARGO_PKG_VERSION"), ?config, "Starting stash");

    let output = cli.execute(&config)?;
    println!("{output}");

    Ok(())
}
