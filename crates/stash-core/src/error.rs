//! Error handling for the Stash core
//!
//! Lookups that simply find nothing are not errors; they return `Option`.
//! The variants here cover the two things that can actually go wrong: a bad
//! configuration value and a resolver that fails to produce an answer.

use thiserror::Error;

/// Error type for Stash core operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StashError {
    /// Configuration and initialization errors
    #[error("Configuration error: {message}")]
    Configuration { message: String, setting: Option<String>, value: Option<String> },

    /// A resolver could not produce an answer for a key
    #[error("Resolver error for '{key}': {message}")]
    Resolver { message: String, key: String },
}

impl StashError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            StashError::Configuration { .. } => "configuration",
            StashError::Resolver { .. } => "resolver",
        }
    }

    /// Check if retrying the operation may succeed.
    ///
    /// Resolver failures are never cached, so the next call tries again.
    pub fn is_recoverable(&self) -> bool {
        match self {
            StashError::Configuration { .. } => false,
            StashError::Resolver { .. } => true,
        }
    }

    /// Create an error for an environment setting that failed to parse
    pub fn invalid_setting(setting: &str, value: &str, message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
            setting: Some(setting.to_string()),
            value: Some(value.to_string()),
        }
    }

    /// Create a resolver failure for `key`
    pub fn resolver(key: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Resolver { message: message.into(), key: key.into() }
    }
}

/// Result type alias for core operations
pub type StashResult<T> = Result<T, StashError>;
