use crate::entity::TerminalError;
use crate::solana::jupiter::models::{SwapRequest, SwapResponse};
use crate::solana::jupiter::quote_service::check_for_api_error;
use crate::solana::jupiter::Config;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

/// Builds signable swap transactions from previously obtained quotes
#[async_trait]
pub trait SwapService: Send + Sync {
    async fn build_swap_transaction(
        &self,
        quote_response: &serde_json::Value,
        user_public_key: &str,
    ) -> Result<SwapResponse>;
}

/// Swap service backed by the Jupiter swap API
pub struct JupiterSwapService {
    http_client: Client,
    config: Config,
}

impl JupiterSwapService {
    pub fn new(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

#[async_trait]
impl SwapService for JupiterSwapService {
    async fn build_swap_transaction(
        &self,
        quote_response: &serde_json::Value,
        user_public_key: &str,
    ) -> Result<SwapResponse> {
        let swap_request = SwapRequest {
            quote_response: quote_response.clone(),
            user_public_key: user_public_key.to_string(),
            wrap_and_unwrap_sol: true,
        };

        debug!(
            "Requesting swap transaction with user_public_key: {}",
            user_public_key
        );

        let response = self
            .http_client
            .post(self.config.swap_url())
            .json(&swap_request)
            .send()
            .await
            .map_err(|e| anyhow!("HTTP request failed: {}", e))?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TerminalError::api("Jupiter", error_text).into());
        }

        let json_value = response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| TerminalError::Decode(format!("swap: {}", e)))?;

        let swap_response: SwapResponse = serde_json::from_value(check_for_api_error(json_value)?)
            .map_err(|e| TerminalError::Decode(format!("swap: {}", e)))?;

        info!(
            "Swap transaction received: tx_length={}",
            swap_response.swap_transaction.len()
        );

        Ok(swap_response)
    }
}
