//! Command-line interface
//!
//! `stash computers` loads the reference inventory through a shared
//! descriptor pool; `stash geocode` sends locations through the memoizing
//! geocode cache.

use crate::report::{GeocodeReport, InventoryReport, LookupLine};
use clap::{Parser, Subcommand, ValueEnum};
use stash_core::geocoder::REFERENCE_LOOKUPS;
use stash_core::inventory::{REFERENCE_INVENTORY, load_inventory};
use stash_core::{
    ComputerCollection, DescriptorFactory, DescriptorPool, GeocodeCache, Geocoder, StashConfig,
    StrictGeocodeCache, StrictGeocoder,
};
use tracing::{debug, info};

/// Shared descriptor pool and memoizing geocode cache
#[derive(Parser, Debug)]
#[command(name = "stash")]
#[command(about = "Shared descriptor pool and memoizing geocode cache")]
#[command(version)]
pub struct StashCli {
    #[command(subcommand)]
    pub command: StashCommand,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text, global = true)]
    pub format: OutputFormat,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum StashCommand {
    /// Load the reference computer inventory into a pooled collection
    Computers,

    /// Resolve locations through the geocode cache
    Geocode {
        /// Locations to resolve, in order; defaults to the reference sequence
        locations: Vec<String>,

        /// Treat unknown locations as errors instead of caching an empty answer
        #[arg(long)]
        strict: bool,
    },
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl StashCli {
    /// Run the selected command and render its report
    pub fn execute(&self, config: &StashConfig) -> anyhow::Result<String> {
        match &self.command {
            StashCommand::Computers => run_computers(config).render(self.format),
            StashCommand::Geocode { locations, strict } => {
                let locations: Vec<String> = if locations.is_empty() {
                    REFERENCE_LOOKUPS.iter().map(|s| s.to_string()).collect()
                } else {
                    locations.clone()
                };
                run_geocode(config, &locations, *strict).render(self.format)
            }
        }
    }
}

/// Load the reference inventory and report how many descriptors it needed
pub fn run_computers(config: &StashConfig) -> InventoryReport {
    let mut pool = DescriptorPool::with_capacity(DescriptorFactory, config.store_capacity);
    let mut computers = ComputerCollection::new(&mut pool);

    load_inventory(&mut computers, &REFERENCE_INVENTORY);

    let report = InventoryReport::from_collection(&computers);
    info!(computers = report.computers, flyweights = report.flyweights, "Inventory loaded");
    report
}

/// Resolve `locations` in order through a fresh geocode cache
pub fn run_geocode(config: &StashConfig, locations: &[String], strict: bool) -> GeocodeReport {
    let report = if strict {
        let mut cache = StrictGeocodeCache::with_capacity(StrictGeocoder::new(), config.store_capacity);
        let lookups: Vec<LookupLine> = locations
            .iter()
            .map(|location| match cache.try_resolve(location.clone()) {
                Ok(coordinates) => LookupLine::answered(location, Some(coordinates)),
                Err(err) => LookupLine::failed(location, &err),
            })
            .collect();

        GeocodeReport {
            strict,
            lookups,
            cache_size: cache.cache_size(),
            resolver_calls: cache.resolver_calls(),
            cache: cache.stats(),
        }
    } else {
        let mut cache = GeocodeCache::with_capacity(Geocoder::new(), config.store_capacity);
        let lookups: Vec<LookupLine> = locations
            .iter()
            .map(|location| {
                let answer = cache.resolve(location.clone());
                debug!(%location, found = answer.is_some(), "Geocoded");
                LookupLine::answered(location, answer.as_ref())
            })
            .collect();

        GeocodeReport {
            strict,
            lookups,
            cache_size: cache.cache_size(),
            resolver_calls: cache.resolver_calls(),
            cache: cache.stats(),
        }
    };

    info!(
        requests = locations.len(),
        cache_size = report.cache_size,
        resolver_calls = report.resolver_calls,
        "Geocoding finished"
    );
    report
}
