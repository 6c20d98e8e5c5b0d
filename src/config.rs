//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `spot-terminal.toml`, then `SPOT_TERMINAL_*` environment variables
//! (`__` separates nested keys, e.g. `SPOT_TERMINAL_CATALOG__MIN_VOLUME_24H`).
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::entity::TerminalError;
use crate::solana::jupiter::Config as JupiterConfig;

pub const DEFAULT_CONFIG_FILE: &str = "spot-terminal.toml";
pub const ENV_PREFIX: &str = "SPOT_TERMINAL";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rpc: RpcConfig,
    pub dexscreener: DexScreenerConfig,
    pub jupiter: JupiterConfig,
    pub orderly: OrderlyConfig,
    pub catalog: CatalogConfig,
    pub trading: TradingConfig,
    pub http: HttpConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RpcConfig {
    pub url: String,
    /// Broadcast without preflight simulation
    pub skip_preflight: bool,
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self {
            url: "https://api.mainnet-beta.solana.com".to_string(),
            skip_preflight: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DexScreenerConfig {
    pub api_url: String,
}

impl Default for DexScreenerConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.dexscreener.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderlyConfig {
    pub api_url: String,
    pub max_markets: usize,
    pub orderbook_depth: usize,
    pub markets_refresh_secs: u64,
    pub orderbook_refresh_secs: u64,
}

impl Default for OrderlyConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.orderly.org/v1/public".to_string(),
            max_markets: 10,
            orderbook_depth: 15,
            markets_refresh_secs: 10,
            orderbook_refresh_secs: 2,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Search queries sent to DexScreener, one request each
    pub pairs: Vec<String>,
    /// Token pinned to the top of the catalog, looked up by address
    pub favorite_token: Option<String>,
    pub chain_id: String,
    /// Pairs below this 24h USD volume are dropped
    pub min_volume_24h: f64,
    /// Survivors kept per search response
    pub max_pairs_per_query: usize,
    /// Search requests in flight at once
    pub concurrency: usize,
    pub refresh_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            pairs: [
                "SOL/USDC", "BTC/USDC", "ETH/USDC", "BONK/USDC", "JUP/USDC", "PYTH/USDC",
                "WIF/USDC", "JTO/USDC", "RNDR/USDC", "ONDO/USDC",
            ]
            .iter()
            .map(|p| p.to_string())
            .collect(),
            favorite_token: None,
            chain_id: "solana".to_string(),
            min_volume_24h: 100_000.0,
            max_pairs_per_query: 5,
            concurrency: 4,
            refresh_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TradingConfig {
    pub slippage_bps: u16,
    pub quote_debounce_ms: u64,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            slippage_bps: crate::entity::DEFAULT_SLIPPAGE_BPS,
            quote_debounce_ms: 500,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 15,
            user_agent: format!("solana-spot-terminal/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl AppConfig {
    /// Load from defaults, `spot-terminal.toml` if present, and the environment
    pub fn load() -> Result<Self, TerminalError> {
        Self::load_from(Some(Path::new(DEFAULT_CONFIG_FILE)), true)
    }

    pub fn load_from(path: Option<&Path>, with_env: bool) -> Result<Self, TerminalError> {
        let defaults = config::Config::try_from(&AppConfig::default())
            .map_err(|e| TerminalError::Config(e.to_string()))?;

        let mut builder = config::Config::builder().add_source(defaults);

        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(false));
        }

        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("catalog.pairs")
                    .try_parsing(true),
            );
        }

        let config: AppConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| TerminalError::Config(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), TerminalError> {
        let invalid = |msg: &str| Err(TerminalError::Config(msg.to_string()));

        if self.rpc.url.trim().is_empty() {
            return invalid("rpc.url must not be empty");
        }
        if self.catalog.pairs.is_empty() && self.catalog.favorite_token.is_none() {
            return invalid("catalog.pairs must list at least one pair");
        }
        if !self.catalog.min_volume_24h.is_finite() || self.catalog.min_volume_24h < 0.0 {
            return invalid("catalog.min_volume_24h must be a non-negative number");
        }
        if self.catalog.max_pairs_per_query == 0 || self.catalog.concurrency == 0 {
            return invalid("catalog.max_pairs_per_query and catalog.concurrency must be positive");
        }
        if self.catalog.refresh_secs == 0
            || self.orderly.markets_refresh_secs == 0
            || self.orderly.orderbook_refresh_secs == 0
        {
            return invalid("refresh intervals must be positive");
        }
        if self.trading.slippage_bps == 0 || self.trading.slippage_bps > 10_000 {
            return invalid("trading.slippage_bps must be within 1..=10000");
        }
        Ok(())
    }
}
