use crate::entity::WalletBalances;
use crate::solana::utils::shorten_address;
use crate::view::format::format_amount;
use crate::view::Console;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait BalanceView: Send + Sync {
    async fn display_balances(&self, balances: &WalletBalances, token_symbol: Option<&str>) -> Result<()>;
    async fn display_no_wallet(&self) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct ConsoleBalanceView {
    console: Console,
}

impl ConsoleBalanceView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

pub fn render_balances(balances: &WalletBalances, token_symbol: Option<&str>) -> String {
    let mut text = format!(
        "Wallet {}\nSOL: {}",
        shorten_address(&balances.owner),
        format_amount(balances.sol)
    );

    if let Some(mint) = &balances.token_mint {
        let label = token_symbol.map(str::to_string).unwrap_or_else(|| shorten_address(mint));
        text.push_str(&format!("\n{}: {}", label, format_amount(balances.token)));
    }

    text
}

#[async_trait]
impl BalanceView for ConsoleBalanceView {
    async fn display_balances(&self, balances: &WalletBalances, token_symbol: Option<&str>) -> Result<()> {
        self.console.print(&render_balances(balances, token_symbol))
    }

    async fn display_no_wallet(&self) -> Result<()> {
        self.console
            .print("No wallet connected. Set WALLET_PRIVATE_KEY to a base58 keypair.")
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.console
            .print(&format!("Failed to fetch balances: {}", error_message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_line_only_with_mint() {
        let mut balances = WalletBalances {
            owner: "9WzDXwBbmkg8ZTbNMqUxvQRAyrZzDsGYdLVL9zYtAWWM".to_string(),
            sol: 1.25,
            token_mint: None,
            token: 0.0,
        };
        assert_eq!(render_balances(&balances, None), "Wallet 9WzDX...tAWWM\nSOL: 1.2500");

        balances.token_mint = Some("JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN".to_string());
        balances.token = 42.0;
        assert!(render_balances(&balances, Some("JUP")).ends_with("\nJUP: 42.0000"));
    }
}
