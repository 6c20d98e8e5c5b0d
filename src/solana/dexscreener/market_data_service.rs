use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;

use crate::config::DexScreenerConfig;
use crate::entity::TerminalError;
use crate::solana::dexscreener::models::{DexPair, DexPairsResponse};

/// Source of DEX pair market data
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Pairs matching a free-text query such as `JUP/USDC`
    async fn search_pairs(&self, query: &str) -> Result<Vec<DexPair>>;

    /// All pairs that trade the given token
    async fn token_pairs(&self, address: &str) -> Result<Vec<DexPair>>;
}

pub struct DexScreenerClient {
    http_client: Client,
    config: DexScreenerConfig,
}

impl DexScreenerClient {
    pub fn new(http_client: Client, config: DexScreenerConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    async fn fetch_pairs(&self, request: reqwest::RequestBuilder) -> Result<Vec<DexPair>> {
        let response = request
            .send()
            .await
            .map_err(|e| anyhow!("DexScreener request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(TerminalError::api(
                "DexScreener",
                format!("status {}", response.status()),
            )
            .into());
        }

        let body: DexPairsResponse = response
            .json()
            .await
            .map_err(|e| TerminalError::Decode(format!("DexScreener pairs: {}", e)))?;

        Ok(body.pairs.unwrap_or_default())
    }

    fn base_url(&self) -> &str {
        self.config.api_url.trim_end_matches('/')
    }
}

#[async_trait]
impl MarketDataSource for DexScreenerClient {
    async fn search_pairs(&self, query: &str) -> Result<Vec<DexPair>> {
        let url = format!("{}/latest/dex/search", self.base_url());
        debug!("Searching DexScreener pairs: {}", query);

        self.fetch_pairs(self.http_client.get(&url).query(&[("q", query)]))
            .await
    }

    async fn token_pairs(&self, address: &str) -> Result<Vec<DexPair>> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url(), address);
        debug!("Requesting DexScreener token pairs: {}", url);

        self.fetch_pairs(self.http_client.get(&url)).await
    }
}
