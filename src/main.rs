//! Column-Scout main entry point
//!
//! This is the command-line interface that loads the URL store and serves the
//! JSON API.

use anyhow::Context;
use clap::Parser;
use column_scout::build_app;
use column_scout::config::{load_config_with_hash, Config};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Column-Scout: saved search columns with live result extraction
///
/// Keeps named sets of search URLs, fetches each one's current results and
/// returns only the listing rows, persisting the sets between runs.
#[derive(Parser, Debug)]
#[command(name = "column-scout")]
#[command(version)]
#[command(about = "Saved search columns with live result extraction", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (defaults apply when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, overriding the config file
    #[arg(long, value_name = "ADDR")]
    bind: Option<SocketAddr>,

    /// Path of the URL store document, overriding the config file
    #[arg(long, value_name = "PATH")]
    store: Option<PathBuf>,

    /// Serve synthetic documents instead of fetching from the network
    #[arg(long)]
    offline: bool,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => {
            tracing::info!("No configuration file given, using defaults");
            Config::default()
        }
    };
    apply_overrides(&mut config, &cli);

    // A corrupt store is fatal: refusing to start beats discarding saved sets
    let (app, store) = build_app(&config).context("failed to start")?;

    let listener = tokio::net::TcpListener::bind(config.server.bind_address.as_str())
        .await
        .with_context(|| format!("failed to bind {}", config.server.bind_address))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Shut down cleanly ({} URL sets)", store.len());
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("column_scout=info,warn"),
            1 => EnvFilter::new("column_scout=debug,tower_http=debug,info"),
            2 => EnvFilter::new("column_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Command-line flags win over the config file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind.to_string();
    }
    if let Some(store) = &cli.store {
        config.store.path = store.clone();
    }
    if cli.offline {
        config.fetcher.offline = true;
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
