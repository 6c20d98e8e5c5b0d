use serde::Deserialize;

use crate::solana::jupiter::models::opt_string_or_float;

/// Body of `/latest/dex/search` and `/latest/dex/tokens/<address>`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPairsResponse {
    #[serde(default)]
    pub pairs: Option<Vec<DexPair>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DexPair {
    #[serde(default)]
    pub chain_id: String,
    #[serde(default)]
    pub dex_id: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub pair_address: Option<String>,
    #[serde(default)]
    pub base_token: Option<DexTokenRef>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub price_usd: Option<f64>,
    #[serde(default)]
    pub price_change: Option<DexWindow>,
    #[serde(default)]
    pub volume: Option<DexWindow>,
    #[serde(default)]
    pub liquidity: Option<DexLiquidity>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub fdv: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexTokenRef {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub symbol: String,
}

/// Per-window figures (`m5`, `h1`, `h6`, `h24`); only the daily one is read
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexWindow {
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub h24: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DexLiquidity {
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub usd: Option<f64>,
}

impl DexPair {
    pub fn base_address(&self) -> Option<&str> {
        self.base_token
            .as_ref()
            .map(|t| t.address.as_str())
            .filter(|a| !a.is_empty())
    }

    pub fn volume_24h(&self) -> f64 {
        self.volume.as_ref().and_then(|v| v.h24).unwrap_or(0.0)
    }

    pub fn price_change_24h(&self) -> f64 {
        self.price_change.as_ref().and_then(|v| v.h24).unwrap_or(0.0)
    }

    pub fn liquidity_usd(&self) -> f64 {
        self.liquidity.as_ref().and_then(|l| l.usd).unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_search_response() {
        let body = r#"{
            "schemaVersion": "1.0.0",
            "pairs": [{
                "chainId": "solana",
                "dexId": "raydium",
                "url": "https://dexscreener.com/solana/pair1",
                "pairAddress": "pair1",
                "baseToken": {"address": "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN", "name": "Jupiter", "symbol": "JUP"},
                "quoteToken": {"address": "EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v", "name": "USD Coin", "symbol": "USDC"},
                "priceNative": "0.0052",
                "priceUsd": "0.8123",
                "priceChange": {"m5": 0.1, "h1": -0.4, "h6": 1.2, "h24": -3.5},
                "volume": {"h24": 1520345.22, "h6": 300000},
                "liquidity": {"usd": 2500000.5, "base": 100, "quote": 200},
                "fdv": 8123000000
            }]
        }"#;

        let response: DexPairsResponse = serde_json::from_str(body).unwrap();
        let pairs = response.pairs.unwrap();
        let pair = &pairs[0];

        assert_eq!(pair.chain_id, "solana");
        assert_eq!(pair.base_address(), Some("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN"));
        assert_eq!(pair.price_usd, Some(0.8123));
        assert_eq!(pair.price_change_24h(), -3.5);
        assert_eq!(pair.volume_24h(), 1520345.22);
        assert_eq!(pair.liquidity_usd(), 2500000.5);
        assert_eq!(pair.fdv, Some(8123000000.0));
    }

    #[test]
    fn null_pairs_and_missing_fields_are_tolerated() {
        let response: DexPairsResponse =
            serde_json::from_str(r#"{"schemaVersion": "1.0.0", "pairs": null}"#).unwrap();
        assert!(response.pairs.is_none());

        let pair: DexPair = serde_json::from_str(r#"{"chainId": "solana"}"#).unwrap();
        assert_eq!(pair.base_address(), None);
        assert_eq!(pair.price_usd, None);
        assert_eq!(pair.volume_24h(), 0.0);
    }
}
