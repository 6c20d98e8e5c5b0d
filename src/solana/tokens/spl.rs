use anyhow::Result;
use log::debug;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::pubkey::Pubkey;
use spl_associated_token_account::get_associated_token_address;

use crate::solana::wallet::parse_pubkey;

/// Associated token account of `owner` for `mint`
pub fn associated_token_account(owner: &Pubkey, mint: &Pubkey) -> Pubkey {
    get_associated_token_address(owner, mint)
}

/// Balance of the owner's associated token account for a mint.
/// A missing account (or any lookup failure) reads as zero.
pub async fn get_token_balance(client: &RpcClient, owner: &str, mint: &str) -> Result<f64> {
    let owner = parse_pubkey(owner)?;
    let mint = parse_pubkey(mint)?;
    let ata = associated_token_account(&owner, &mint);

    match client.get_token_account_balance(&ata).await {
        Ok(amount) => Ok(amount.ui_amount.unwrap_or(0.0)),
        Err(e) => {
            debug!("No token balance for {} ({}): {}", mint, ata, e);
            Ok(0.0)
        }
    }
}
