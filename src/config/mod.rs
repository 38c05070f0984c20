//! Configuration module for Column-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so running without a file is equivalent to loading
//! an empty one.
//!
//! # Example
//!
//! ```no_run
//! use column_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("column-scout.toml")).unwrap();
//! println!("Fetch timeout: {}ms", config.fetcher.timeout_ms);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, FetcherConfig, ServerConfig, StoreConfig};

// Re-export parser functions
pub use parser::{hash_config_content, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
