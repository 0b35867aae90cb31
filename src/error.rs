//! Unified error types for Organism
//!
//! The health model itself never fails. Only the surroundings do:
//! reading manifests and driving the CLI.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Organism operations
#[derive(Error, Debug)]
pub enum Error {
    // Config errors
    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config validation failed: {0}")]
    ConfigValidation(String),

    // Limb errors
    #[error("Limb '{0}' not found")]
    UnknownLimb(String),

    // Output errors
    #[error("Failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for Organism operations
pub type Result<T> = std::result::Result<T, Error>;
