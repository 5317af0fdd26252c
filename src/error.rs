//! Error types for configuration handling

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or validating settings
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A setting holds something other than an integer
    #[error("Setting '{key}' is not an integer: {value}")]
    NotAnInteger { key: String, value: serde_json::Value },

    /// A reminder interval outside the accepted range
    #[error("Invalid reminder interval {minutes} (expected 1..={max} minutes)")]
    InvalidInterval { minutes: i64, max: i64 },

    /// The settings file could not be read
    #[error("Failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON
    #[error("Failed to parse settings: {0}")]
    Parse(#[from] serde_json::Error),

    /// The settings document is valid JSON but not an object
    #[error("Settings must be a JSON object")]
    NotAnObject,
}
