//! Environment-based configuration
//!
//! All settings have defaults; the environment only overrides them.

use crate::error::{StashError, StashResult};
use serde::Serialize;
use tracing::warn;

/// Environment variable holding the initial capacity hint for stores
pub const STORE_CAPACITY_VAR: &str = "STASH_STORE_CAPACITY";
/// Environment variable holding the default tracing filter
pub const LOG_FILTER_VAR: &str = "STASH_LOG_FILTER";
/// Environment variable switching log output to JSON lines
pub const LOG_JSON_VAR: &str = "STASH_LOG_JSON";

const DEFAULT_STORE_CAPACITY: usize = 16;
const DEFAULT_LOG_FILTER: &str = "stash=info";

/// Runtime configuration shared by the library components and the CLI
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StashConfig {
    /// Initial capacity hint for stores. Pre-sizes maps only, never a bound.
    pub store_capacity: usize,
    /// Tracing filter used when `RUST_LOG` is not set
    pub log_filter: String,
    /// Emit JSON formatted log lines
    pub log_json: bool,
}

impl Default for StashConfig {
    fn default() -> Self {
        Self {
            store_capacity: DEFAULT_STORE_CAPACITY,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_json: false,
        }
    }
}

impl StashConfig {
    /// Create configuration from environment variables, falling back to the
    /// defaults when a value is missing or malformed
    pub fn from_environment() -> Self {
        let (config, error) = Self::from_environment_or_default();
        if let Some(err) = error {
            warn!(error = %err, category = err.category(), "Invalid configuration, using defaults");
        }
        config
    }

    /// Like [`from_environment`](Self::from_environment) but hands the
    /// rejected setting back instead of logging it, for callers that install
    /// their subscriber only after configuration is known
    pub fn from_environment_or_default() -> (Self, Option<StashError>) {
        Self::from_lookup_or_default(|name| std::env::var(name).ok())
    }

    /// Create configuration from environment variables, rejecting malformed values
    pub fn try_from_environment() -> StashResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build configuration from `lookup`, using the defaults for everything
    /// if any value is malformed
    pub fn from_lookup_or_default<F>(lookup: F) -> (Self, Option<StashError>)
    where
        F: Fn(&str) -> Option<String>,
    {
        match Self::from_lookup(lookup) {
            Ok(config) => (config, None),
            Err(err) => (Self::default(), Some(err)),
        }
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> StashResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(STORE_CAPACITY_VAR) {
            config.store_capacity = raw.trim().parse().map_err(|_| {
                StashError::invalid_setting(
                    STORE_CAPACITY_VAR,
                    &raw,
                    "expected a non-negative integer",
                )
            })?;
        }

        if let Some(filter) = lookup(LOG_FILTER_VAR) {
            if !filter.trim().is_empty() {
                config.log_filter = filter;
            }
        }

        if let Some(raw) = lookup(LOG_JSON_VAR) {
            config.log_json = parse_flag(&raw)
                .ok_or_else(|| StashError::invalid_setting(LOG_JSON_VAR, &raw, "expected true or false"))?;
        }

        Ok(config)
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = StashConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, StashConfig::default());
        assert_eq!(config.store_capacity, 16);
        assert_eq!(config.log_filter, "stash=info");
        assert!(!config.log_json);
    }

    #[test]
    fn test_overrides_from_environment() {
        let config = StashConfig::from_lookup(lookup_from(&[
            (STORE_CAPACITY_VAR, "256"),
            (LOG_FILTER_VAR, "stash=debug"),
            (LOG_JSON_VAR, "yes"),
        ]))
        .unwrap();

        assert_eq!(config.store_capacity, 256);
        assert_eq!(config.log_filter, "stash=debug");
        assert!(config.log_json);
    }

    #[test]
    fn test_blank_filter_keeps_default() {
        let config = StashConfig::from_lookup(lookup_from(&[(LOG_FILTER_VAR, "  ")])).unwrap();
        assert_eq!(config.log_filter, "stash=info");
    }

    #[test]
    fn test_malformed_capacity_is_rejected() {
        let err = StashConfig::from_lookup(lookup_from(&[(STORE_CAPACITY_VAR, "lots")]))
            .unwrap_err();

        match err {
            StashError::Configuration { setting, value, .. } => {
                assert_eq!(setting.as_deref(), Some(STORE_CAPACITY_VAR));
                assert_eq!(value.as_deref(), Some("lots"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_malformed_capacity_falls_back_to_defaults() {
        let (config, error) = StashConfig::from_lookup_or_default(lookup_from(&[
            (STORE_CAPACITY_VAR, "lots"),
            (LOG_FILTER_VAR, "stash=trace"),
        ]));

        assert_eq!(config, StashConfig::default());
        let error = error.unwrap();
        assert_eq!(error.category(), "configuration");
        assert!(!error.is_recoverable());
    }

    #[test]
    fn test_valid_lookup_reports_no_error() {
        let (config, error) =
            StashConfig::from_lookup_or_default(lookup_from(&[(STORE_CAPACITY_VAR, "64")]));

        assert!(error.is_none());
        assert_eq!(config.store_capacity, 64);
    }

    #[test]
    fn test_config_serializes_to_json() {
        let json = serde_json::to_value(StashConfig::default()).unwrap();
        assert_eq!(json["store_capacity"], 16);
        assert_eq!(json["log_filter"], "stash=info");
        assert_eq!(json["log_json"], false);
    }

    #[test]
    fn test_malformed_flag_is_rejected() {
        let result = StashConfig::from_lookup(lookup_from(&[(LOG_JSON_VAR, "maybe")]));
        assert!(result.is_err());
    }
}
