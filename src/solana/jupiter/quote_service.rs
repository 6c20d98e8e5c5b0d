use anyhow::{anyhow, Result};
use async_trait::async_trait;
use log::{debug, info};
use reqwest::Client;

use crate::entity::TerminalError;
use crate::solana::jupiter::models::{ErrorResponse, QuoteParams};
use crate::solana::jupiter::Config;

/// Interface for swap quote retrieval
#[async_trait]
pub trait QuoteService: Send + Sync {
    /// Request a quote. The response is returned verbatim so it can be
    /// replayed into the swap build call.
    async fn get_quote(&self, params: &QuoteParams) -> Result<serde_json::Value>;
}

/// Quote service backed by the Jupiter quote API
pub struct JupiterQuoteService {
    http_client: Client,
    config: Config,
}

impl JupiterQuoteService {
    pub fn new(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
        }
    }
}

/// Check an API response body for an error payload
pub fn check_for_api_error(value: serde_json::Value) -> Result<serde_json::Value> {
    if let Ok(ErrorResponse { error }) = serde_json::from_value::<ErrorResponse>(value.clone()) {
        Err(TerminalError::api("Jupiter", error).into())
    } else {
        Ok(value)
    }
}

#[async_trait]
impl QuoteService for JupiterQuoteService {
    async fn get_quote(&self, params: &QuoteParams) -> Result<serde_json::Value> {
        debug!("Requesting quote with parameters: {:?}", params);

        let response = self
            .http_client
            .get(self.config.quote_url())
            .query(&[
                ("inputMint", params.input_mint.clone()),
                ("outputMint", params.output_mint.clone()),
                ("amount", params.amount.to_string()),
                ("slippageBps", params.slippage_bps.to_string()),
            ])
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
            .map_err(|e| TerminalError::Decode(format!("quote: {}", e)))?;

        let quote = check_for_api_error(json_value)?;

        info!(
            "Quote received successfully: input_amount={}, output_amount={}",
            quote["inAmount"], quote["outAmount"]
        );

        Ok(quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_payload_becomes_error() {
        let result = check_for_api_error(serde_json::json!({"error": "No routes found"}));
        let message = result.unwrap_err().to_string();
        assert!(message.contains("No routes found"));
    }

    #[test]
    fn quote_payload_passes_through() {
        let body = serde_json::json!({"inAmount": "1000", "outAmount": "42", "routePlan": []});
        assert_eq!(check_for_api_error(body.clone()).unwrap(), body);
    }
}
