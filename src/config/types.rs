use serde::Deserialize;
use std::path::PathBuf;

/// Main configuration structure for Column-Scout
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub fetcher: FetcherConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// HTTP boundary configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Socket address the API listens on
    #[serde(rename = "bind-address", default = "default_bind_address")]
    pub bind_address: String,

    /// Directory served under /static (and its images/ under /images)
    #[serde(rename = "static-dir", default)]
    pub static_dir: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            static_dir: None,
        }
    }
}

/// Outbound fetch configuration
#[derive(Debug, Clone, Deserialize)]
pub struct FetcherConfig {
    /// Whole-request timeout (milliseconds)
    #[serde(rename = "timeout-ms", default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Upper bound (exclusive) of the random pre-fetch delay (milliseconds)
    #[serde(rename = "max-jitter-ms", default = "default_max_jitter_ms")]
    pub max_jitter_ms: u64,

    /// Return a synthetic document instead of touching the network
    #[serde(default)]
    pub offline: bool,

    /// User-Agent header sent upstream
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetcherConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_jitter_ms: default_max_jitter_ms(),
            offline: false,
            user_agent: default_user_agent(),
        }
    }
}

/// Durable URL store configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Path to the JSON document holding every URL set
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_bind_address() -> String {
    "127.0.0.1:8080".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

fn default_max_jitter_ms() -> u64 {
    1000
}

fn default_user_agent() -> String {
    concat!("column-scout/", env!("CARGO_PKG_VERSION")).to_string()
}

fn default_store_path() -> PathBuf {
    PathBuf::from("urlsets.json")
}
