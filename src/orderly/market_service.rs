use std::collections::HashMap;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::config::OrderlyConfig;
use crate::entity::{OrderBook, PerpMarket, PerpMarketInfo, TerminalError};
use crate::orderly::models::{
    FundingRateRow, FuturesRow, OrderlyEnvelope, RawMarketInfo, RawOrderBook, Rows,
};

/// Read-only perpetual market data
#[async_trait]
pub trait PerpMarketService: Send + Sync {
    async fn get_markets(&self) -> Result<Vec<PerpMarket>>;

    /// Estimated funding rate keyed by market symbol
    async fn get_funding_rates(&self) -> Result<HashMap<String, f64>>;

    async fn get_market_info(&self, symbol: &str) -> Result<PerpMarketInfo>;

    async fn get_order_book(&self, symbol: &str, depth: usize) -> Result<OrderBook>;
}

pub struct OrderlyMarketService {
    http_client: Client,
    config: OrderlyConfig,
}

impl OrderlyMarketService {
    pub fn new(http_client: Client, config: OrderlyConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    async fn get_public<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}/{}", self.config.api_url.trim_end_matches('/'), path);
        debug!("Requesting Orderly endpoint: {}", url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow!("Orderly request failed: {}", e))?;

        if !response.status().is_success() {
            return Err(
                TerminalError::api("Orderly", format!("status {}", response.status())).into(),
            );
        }

        let envelope: OrderlyEnvelope<T> = response
            .json()
            .await
            .map_err(|e| TerminalError::Decode(format!("Orderly {}: {}", path, e)))?;

        unwrap_envelope(envelope, path)
    }
}

pub fn unwrap_envelope<T>(envelope: OrderlyEnvelope<T>, path: &str) -> Result<T> {
    match (envelope.success, envelope.data) {
        (true, Some(data)) => Ok(data),
        (true, None) => Err(TerminalError::api("Orderly", format!("{}: empty data", path)).into()),
        (false, _) => Err(TerminalError::api(
            "Orderly",
            envelope
                .message
                .unwrap_or_else(|| format!("{}: request unsuccessful", path)),
        )
        .into()),
    }
}

#[async_trait]
impl PerpMarketService for OrderlyMarketService {
    async fn get_markets(&self) -> Result<Vec<PerpMarket>> {
        let rows: Rows<FuturesRow> = self.get_public("futures").await?;

        Ok(rows
            .rows
            .into_iter()
            .take(self.config.max_markets)
            .map(PerpMarket::from)
            .collect())
    }

    async fn get_funding_rates(&self) -> Result<HashMap<String, f64>> {
        let rows: Rows<FundingRateRow> = self.get_public("funding_rates").await?;

        Ok(rows
            .rows
            .into_iter()
            .filter_map(|r| r.est_funding_rate.map(|rate| (r.symbol, rate)))
            .collect())
    }

    async fn get_market_info(&self, symbol: &str) -> Result<PerpMarketInfo> {
        let raw: RawMarketInfo = self.get_public(&format!("info/{}", symbol)).await?;
        Ok(raw.into())
    }

    async fn get_order_book(&self, symbol: &str, depth: usize) -> Result<OrderBook> {
        let raw: RawOrderBook = self.get_public(&format!("orderbook/{}", symbol)).await?;

        Ok(OrderBook {
            symbol: symbol.to_string(),
            asks: raw.asks.into_iter().take(depth).map(Into::into).collect(),
            bids: raw.bids.into_iter().take(depth).map(Into::into).collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unsuccessful_envelope_is_an_error() {
        let envelope: OrderlyEnvelope<Rows<FuturesRow>> =
            serde_json::from_str(r#"{"success": false, "message": "rate limited"}"#).unwrap();
        let err = unwrap_envelope(envelope, "futures").unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn successful_envelope_yields_data() {
        let envelope: OrderlyEnvelope<Rows<FundingRateRow>> = serde_json::from_str(
            r#"{"success": true, "data": {"rows": [{"symbol": "PERP_SOL_USDC", "est_funding_rate": "0.00012"}]}}"#,
        )
        .unwrap();
        let rows = unwrap_envelope(envelope, "funding_rates").unwrap();
        assert_eq!(rows.rows[0].est_funding_rate, Some(0.00012));
    }
}
