//! Column-Scout: saved search columns with live result extraction
//!
//! This crate keeps several named sets of search URLs ("columns"), fetches each
//! query's live results, cuts the repeating result-row region out of the
//! returned page, and persists the URL sets across restarts.

pub mod api;
pub mod config;
pub mod query;
pub mod store;

use thiserror::Error;

/// Main error type for Column-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Store error: {0}")]
    Store(#[from] store::StoreError),

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),
}

/// Result type alias for Column-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use api::build_app;
pub use config::Config;
pub use query::{ExtractedFragment, Fetcher, QueryOutcome, QueryService};
pub use store::{Slot, Store, UrlSet};
