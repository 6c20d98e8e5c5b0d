use crate::entity::WalletBalances;
use crate::solana;
use anyhow::Result;
use async_trait::async_trait;
use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use std::sync::Arc;

#[async_trait]
pub trait BalanceInteractor: Send + Sync {
    /// SOL balance of `owner`, plus the balance of `token_mint` held in the
    /// owner's associated token account when a mint is given.
    async fn get_balances(&self, owner: &str, token_mint: Option<&str>) -> Result<WalletBalances>;
}

pub struct BalanceInteractorImpl {
    solana_client: Arc<RpcClient>,
}

impl BalanceInteractorImpl {
    pub fn new(solana_client: Arc<RpcClient>) -> Self {
        Self { solana_client }
    }
}

#[async_trait]
impl BalanceInteractor for BalanceInteractorImpl {
    async fn get_balances(&self, owner: &str, token_mint: Option<&str>) -> Result<WalletBalances> {
        let sol = solana::get_sol_balance(&self.solana_client, owner).await?;

        // A missing token account reads as zero inside get_token_balance
        let token = match token_mint {
            Some(mint) => solana::get_token_balance(&self.solana_client, owner, mint).await?,
            None => 0.0,
        };

        debug!("Balances for {}: {} SOL, {} token", owner, sol, token);

        Ok(WalletBalances {
            owner: owner.to_string(),
            sol,
            token_mint: token_mint.map(str::to_string),
            token,
        })
    }
}
