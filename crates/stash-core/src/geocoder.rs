//! Reference geocoder
//!
//! A stand-in for a slow external geocoding service. It knows four cities;
//! anything else has no coordinates. [`GeocodeCache`] puts a [`ResultCache`]
//! in front of it so repeated lookups never reach the service twice.

use crate::error::StashError;
use crate::result_cache::{ResultCache, Resolver};
use stash_types::Coordinates;
use std::convert::Infallible;

/// Lookup sequence with eleven requests for three distinct cities
pub const REFERENCE_LOOKUPS: [&str; 11] = [
    "Paris",
    "London",
    "London",
    "London",
    "London",
    "Amsterdam",
    "Amsterdam",
    "Amsterdam",
    "Amsterdam",
    "London",
    "London",
];

/// Fixed-table geocoder
#[derive(Debug, Clone, Copy, Default)]
pub struct Geocoder;

impl Geocoder {
    pub fn new() -> Self {
        Self
    }

    /// Coordinates of `location`, if known
    pub fn lookup(&self, location: &str) -> Option<Coordinates> {
        match location {
            "Amsterdam" => Some(Coordinates::new(52.3700, 4.8900)),
            "London" => Some(Coordinates::new(51.5171, -0.1062)),
            "Paris" => Some(Coordinates::new(48.8742, 2.3470)),
            "Berlin" => Some(Coordinates::new(52.5233, 13.4127)),
            _ => None,
        }
    }
}

impl Resolver<String> for Geocoder {
    type Output = Option<Coordinates>;
    type Error = Infallible;

    fn resolve(&self, location: &String) -> Result<Option<Coordinates>, Infallible> {
        Ok(self.lookup(location))
    }
}

/// Geocoder that treats unknown locations as a failure instead of an empty
/// answer, so they are retried rather than cached
#[derive(Debug, Clone, Copy, Default)]
pub struct StrictGeocoder {
    inner: Geocoder,
}

impl StrictGeocoder {
    pub fn new() -> Self {
        Self { inner: Geocoder::new() }
    }
}

impl Resolver<String> for StrictGeocoder {
    type Output = Coordinates;
    type Error = StashError;

    fn resolve(&self, location: &String) -> Result<Coordinates, StashError> {
        self.inner
            .lookup(location)
            .ok_or_else(|| StashError::resolver(location.as_str(), "unknown location"))
    }
}

/// Memoizing geocoder; unknown locations are cached as `None`
pub type GeocodeCache = ResultCache<String, Geocoder>;

/// Memoizing strict geocoder; unknown locations are never cached
pub type StrictGeocodeCache = ResultCache<String, StrictGeocoder>;
