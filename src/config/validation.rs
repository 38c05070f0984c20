use crate::config::types::{Config, FetcherConfig, ServerConfig, StoreConfig};
use crate::ConfigError;
use std::net::SocketAddr;

const MAX_TIMEOUT_MS: u64 = 60_000;
const MAX_JITTER_MS: u64 = 10_000;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_server_config(&config.server)?;
    validate_fetcher_config(&config.fetcher)?;
    validate_store_config(&config.store)?;
    Ok(())
}

/// Validates server configuration
fn validate_server_config(config: &ServerConfig) -> Result<(), ConfigError> {
    config
        .bind_address
        .parse::<SocketAddr>()
        .map_err(|e| ConfigError::InvalidAddress(format!("'{}': {}", config.bind_address, e)))?;

    if let Some(dir) = &config.static_dir {
        if dir.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "static_dir cannot be empty when set".to_string(),
            ));
        }
    }

    Ok(())
}

/// Validates fetcher configuration
fn validate_fetcher_config(config: &FetcherConfig) -> Result<(), ConfigError> {
    if config.timeout_ms < 1 || config.timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::Validation(format!(
            "timeout_ms must be between 1 and {}, got {}",
            MAX_TIMEOUT_MS, config.timeout_ms
        )));
    }

    if config.max_jitter_ms > MAX_JITTER_MS {
        return Err(ConfigError::Validation(format!(
            "max_jitter_ms must be <= {}, got {}",
            MAX_JITTER_MS, config.max_jitter_ms
        )));
    }

    validate_user_agent(&config.user_agent)?;

    Ok(())
}

/// Validates store configuration
fn validate_store_config(config: &StoreConfig) -> Result<(), ConfigError> {
    if config.path.as_os_str().is_empty() {
        return Err(ConfigError::Validation(
            "store path cannot be empty".to_string(),
        ));
    }

    if config.path.file_name().is_none() {
        return Err(ConfigError::Validation(format!(
            "store path must name a file, got '{}'",
            config.path.display()
        )));
    }

    Ok(())
}

/// User-Agent must be a non-empty, visible-ASCII header value
fn validate_user_agent(user_agent: &str) -> Result<(), ConfigError> {
    if user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if !user_agent.chars().all(|c| c == ' ' || c.is_ascii_graphic()) {
        return Err(ConfigError::Validation(format!(
            "user_agent must contain only printable ASCII, got '{}'",
            user_agent
        )));
    }

    Ok(())
}
