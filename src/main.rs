//! Solana Spot Terminal - Main executable
//!
//! Command-line front end for browsing the DexScreener token catalog,
//! quoting and sending Jupiter swaps, and watching Orderly perp markets.
use anyhow::{bail, Context};
use clap::Parser;
use dotenv::dotenv;
use log::info;
use solana_spot_terminal::commands::Cli;
use solana_spot_terminal::config::DEFAULT_CONFIG_FILE;
use solana_spot_terminal::{AppConfig, CommandRouter, ServiceContainer};
use std::path::Path;
use std::sync::Arc;

/// Application entry point
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logging with default level of "info"
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let cli = Cli::parse();
    info!("Starting Solana Spot Terminal v{}", solana_spot_terminal::VERSION);

    let config_path = match &cli.config {
        Some(path) => {
            if !path.exists() {
                bail!("Config file {} not found", path.display());
            }
            path.as_path()
        }
        None => Path::new(DEFAULT_CONFIG_FILE),
    };

    let config = AppConfig::load_from(Some(config_path), true)
        .context("Failed to load configuration")?;
    info!("Using RPC endpoint {}", config.rpc.url);

    let services = Arc::new(
        ServiceContainer::new(config).context("Failed to initialize services")?,
    );

    CommandRouter::new(services).dispatch(cli.command).await
}
