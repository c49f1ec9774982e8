//! Health Coach API Server
//!
//! Run with: cargo run --bin healthcoach-api
//!
//! # Configuration
//!
//! Read from `--config`, `HEALTHCOACH_CONFIG`, or the default locations
//! (see `healthcoach::config`), then overridden by environment variables:
//! - `HEALTHCOACH_DATABASE`: SQLite database path
//! - `HEALTHCOACH_API_HOST` / `HEALTHCOACH_API_PORT`: bind address (default 0.0.0.0:8001)
//! - `HEALTHCOACH_JWT_SECRET`: token signing secret (random per run if unset)
//! - `HEALTHCOACH_LOG_LEVEL` / `HEALTHCOACH_LOG_FORMAT`: logging
//! - `RUST_LOG`: full filter directive, wins over the log level
//!
//! A config file that exists but cannot be read, parsed or validated stops
//! startup.

use clap::Parser;
use healthcoach::api::{serve, ApiConfig, AppState};
use healthcoach::auth::TokenIssuer;
use healthcoach::config::Config;
use healthcoach::store::Store;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "healthcoach-api")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "AI Health Coach API server")]
struct Args {
    /// Config file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind host
    #[arg(long)]
    host: Option<String>,

    /// Override the bind port
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Any config problem stops startup before the subscriber exists
    let (mut config, config_path) = match args.config {
        Some(path) => (Config::load_with_env(&path)?, Some(path)),
        None => Config::load_default()?,
    };
    if let Some(host) = args.host {
        config.api.host = host;
    }
    if let Some(port) = args.port {
        config.api.port = port;
    }

    healthcoach::logging::init(&config.logging);

    tracing::info!("Starting Health Coach API server v{}", env!("CARGO_PKG_VERSION"));
    match &config_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("No config file found, using defaults with environment overrides"),
    }
    tracing::info!("Database: {}", config.storage.database_path);

    let store = Arc::new(Store::open(&config.storage.database_path)?);
    tracing::info!("Store opened, {} registered users", store.user_count().await?);

    let tokens = TokenIssuer::from_secret_or_random(
        config.auth.jwt_secret.as_deref(),
        config.auth.token_expiry_days,
    );

    let api_config = ApiConfig::from_config(&config);
    if api_config.cors_origins.is_empty() {
        tracing::info!("CORS: any origin");
    } else {
        tracing::info!("CORS origins: {:?}", api_config.cors_origins);
    }

    let state = AppState::new(store, tokens, api_config.clone());

    tracing::info!("Starting server on {}", api_config.addr());
    serve(state, &api_config).await?;

    tracing::info!("Health Coach API server stopped");
    Ok(())
}
