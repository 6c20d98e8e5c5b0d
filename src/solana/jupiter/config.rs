use serde::{Deserialize, Serialize};

use crate::solana::jupiter::models::{SOL_MINT, USDC_MINT};

/// Jupiter endpoints and well-known mints
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL for quote and swap API
    pub quote_api_url: String,

    /// URL for the token metadata list
    pub token_list_url: String,

    /// SOL token address (wrapped)
    pub sol_token_address: String,

    /// USDC token address
    pub usdc_token_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            quote_api_url: "https://quote-api.jup.ag/v6".to_string(),
            token_list_url: "https://token.jup.ag/strict".to_string(),
            sol_token_address: SOL_MINT.to_string(),
            usdc_token_address: USDC_MINT.to_string(),
        }
    }
}

impl Config {
    pub fn quote_url(&self) -> String {
        format!("{}/quote", self.quote_api_url.trim_end_matches('/'))
    }

    pub fn swap_url(&self) -> String {
        format!("{}/swap", self.quote_api_url.trim_end_matches('/'))
    }
}
