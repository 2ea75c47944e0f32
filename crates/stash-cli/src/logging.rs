//! Tracing subscriber setup

use stash_core::StashConfig;
use tracing_subscriber::EnvFilter;

/// Install the global tracing subscriber.
///
/// `RUST_LOG` wins over the configured filter; `verbose` overrides both with
/// `debug`. Logs go to stderr so reports on stdout stay machine-readable.
pub fn init_tracing(config: &StashConfig, verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter))
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if config.log_json {
        builder.json().try_init().map_err(|e| anyhow::anyhow!(e))
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!(e))
    }
}
