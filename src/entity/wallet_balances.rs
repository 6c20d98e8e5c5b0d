use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WalletBalances {
    pub owner: String,
    pub sol: f64,
    pub token_mint: Option<String>,
    pub token: f64,
}
