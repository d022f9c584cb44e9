//! Stress API: serves the stress dataset over HTTP.
//!
//! This is the application entry point. It initializes tracing, loads
//! configuration, loads the dataset (refusing to start if it is missing),
//! sets up the Axum router and starts the HTTP server.

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use stress_api::config::{AppConfig, DEFAULT_CONFIG_PATH, DEFAULT_LOG_FILTER};
use stress_api::dataset::{executable_dir, load_table};
use stress_api::http::start_server;
use stress_api::{create_router, AppState};

/// Stress API: serves the stress dataset as JSON
#[derive(Parser, Debug)]
#[command(name = "stress-api", version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Log level filter (e.g., "stress_api=debug,tower_http=info")
    #[arg(short, long)]
    log_level: Option<String>,

    /// Dataset CSV path, overriding the configured one
    #[arg(short, long)]
    dataset: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Config is read before tracing starts since it selects the log format
    let config_path = args.config.as_deref().unwrap_or(DEFAULT_CONFIG_PATH);
    let mut config = AppConfig::load_or_default(config_path, args.config.is_some())?;

    // Initialize tracing with priority: CLI > env > default
    let log_filter = args
        .log_level
        .or_else(|| std::env::var("RUST_LOG").ok())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());

    let registry =
        tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::new(&log_filter));
    if config.logging.is_json() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!(config = %config_path, "Loaded configuration");

    // A path given on the command line is relative to the working directory
    if let Some(dataset) = args.dataset {
        config.dataset.path = std::env::current_dir()?.join(dataset);
    }

    let dataset_path = config.dataset.resolve_path(&executable_dir()?);
    let table = load_table(&dataset_path).inspect_err(|e| {
        tracing::error!(error = %e, "Failed to load dataset");
    })?;

    if table.column_index(&config.dataset.stress_column).is_none() {
        tracing::warn!(
            column = %config.dataset.stress_column,
            "Stress column not present in dataset; /data/stress will report an error"
        );
    }

    let state = AppState::new(config.clone(), table);
    let app = create_router(state);

    start_server(app, &config.http).await?;

    Ok(())
}
