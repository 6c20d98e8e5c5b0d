use anyhow::Result;
use async_trait::async_trait;
use log::info;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_client::rpc_config::RpcSendTransactionConfig;
use solana_sdk::transaction::VersionedTransaction;

use crate::entity::TerminalError;

/// Submits signed transactions to the network
#[async_trait]
pub trait TransactionBroadcaster: Send + Sync {
    /// Send a signed transaction, returning its signature
    async fn broadcast(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<String>;
}

#[async_trait]
impl TransactionBroadcaster for RpcClient {
    async fn broadcast(
        &self,
        transaction: &VersionedTransaction,
        skip_preflight: bool,
    ) -> Result<String> {
        let config = RpcSendTransactionConfig {
            skip_preflight,
            ..RpcSendTransactionConfig::default()
        };

        let signature = self
            .send_transaction_with_config(transaction, config)
            .await
            .map_err(|e| TerminalError::Broadcast(e.to_string()))?;

        info!("Transaction sent: {}", signature);
        Ok(signature.to_string())
    }
}
