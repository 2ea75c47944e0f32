//! Run reports and their text/JSON rendering

use crate::cli::OutputFormat;
use serde::Serialize;
use stash_core::{ComputerCollection, Coordinates, StashError, StoreStats};
use std::fmt::Write as _;

/// Outcome of loading an inventory into a pooled collection
#[derive(Debug, Clone, Serialize)]
pub struct InventoryReport {
    /// Records added, counting replacements
    pub computers: usize,
    /// Distinct shared descriptors in the pool
    pub flyweights: usize,
    /// Descriptor names, sorted
    pub descriptors: Vec<String>,
    pub pool: StoreStats,
}

impl InventoryReport {
    pub fn from_collection(computers: &ComputerCollection<'_>) -> Self {
        let mut descriptors: Vec<String> =
            computers.pool().values().map(|descriptor| descriptor.to_string()).collect();
        descriptors.sort();

        Self {
            computers: computers.count(),
            flyweights: computers.pool_size(),
            descriptors,
            pool: computers.pool().stats(),
        }
    }

    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                Ok(format!("Computers: {}\nFlyweights: {}", self.computers, self.flyweights))
            }
        }
    }
}

/// One geocode request and what came back
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LookupLine {
    pub location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coordinates: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LookupLine {
    pub fn answered(location: &str, coordinates: Option<&Coordinates>) -> Self {
        Self {
            location: location.to_string(),
            coordinates: coordinates.map(ToString::to_string),
            error: None,
        }
    }

    pub fn failed(location: &str, error: &StashError) -> Self {
        Self { location: location.to_string(), coordinates: None, error: Some(error.to_string()) }
    }
}

/// Outcome of a sequence of geocode requests through the cache
#[derive(Debug, Clone, Serialize)]
pub struct GeocodeReport {
    pub strict: bool,
    pub lookups: Vec<LookupLine>,
    pub cache_size: usize,
    pub resolver_calls: usize,
    pub cache: StoreStats,
}

impl GeocodeReport {
    pub fn render(&self, format: OutputFormat) -> anyhow::Result<String> {
        match format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(self)?),
            OutputFormat::Text => {
                let mut out = String::new();
                for line in &self.lookups {
                    match (&line.coordinates, &line.error) {
                        (Some(coordinates), _) => writeln!(out, "{}: {coordinates}", line.location)?,
                        (None, Some(error)) => writeln!(out, "{}: {error}", line.location)?,
                        (None, None) => writeln!(out, "{}: unknown", line.location)?,
                    }
                }
                writeln!(out)?;
                writeln!(out, "Cache size: {}", self.cache_size)?;
                write!(out, "Resolver calls: {}", self.resolver_calls)?;
                Ok(out)
            }
        }
    }
}
