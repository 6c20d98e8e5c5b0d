use anyhow::Result;
use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;

use crate::entity::TerminalError;
use crate::solana::utils::lamports_to_sol;
use crate::solana::wallet::parse_pubkey;

/// Native SOL balance of `owner`
pub async fn get_sol_balance(client: &RpcClient, owner: &str) -> Result<f64> {
    let pubkey = parse_pubkey(owner)?;

    let lamports = client
        .get_balance(&pubkey)
        .await
        .map_err(|e| TerminalError::api("Solana RPC", format!("getBalance {}: {}", owner, e)))?;

    debug!("{} holds {} lamports", owner, lamports);
    Ok(lamports_to_sol(lamports))
}
