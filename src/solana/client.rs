use anyhow::{anyhow, Result};
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::commitment_config::CommitmentConfig;
use std::sync::Arc;
use std::time::Duration;

use crate::config::HttpConfig;

/// Create a Solana client with confirmed commitment
pub fn create_solana_client(rpc_url: &str) -> Result<Arc<RpcClient>> {
    if rpc_url.trim().is_empty() {
        return Err(anyhow!("Solana RPC URL is empty"));
    }

    let client = RpcClient::new_with_commitment(rpc_url.to_string(), CommitmentConfig::confirmed());

    Ok(Arc::new(client))
}

/// Shared HTTP client for the market-data and aggregator APIs
pub fn create_http_client(config: &HttpConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|e| anyhow!("Failed to create HTTP client: {}", e))
}
