use anyhow::{anyhow, Result};
use clap::Args;
use std::sync::Arc;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::balance_presenter::{BalancePresenter, BalancePresenterImpl};
use crate::utils::validate_solana_address;
use crate::view::balance_view::ConsoleBalanceView;
use crate::view::Console;

#[derive(Args, Debug, Clone)]
pub struct BalanceArgs {
    /// Also show the balance of this token (symbol or mint address)
    #[arg(long)]
    pub token: Option<String>,

    /// Query this address instead of the connected wallet
    #[arg(long)]
    pub address: Option<String>,
}

pub struct BalanceCommand;

impl CommandHandler for BalanceCommand {
    type Args = BalanceArgs;

    fn command_name() -> &'static str {
        "balance"
    }

    fn description() -> &'static str {
        "show SOL and token balances"
    }

    async fn execute(args: BalanceArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let owner = match args.address {
            Some(address) if validate_solana_address(&address) => Some(address),
            Some(address) => return Err(anyhow!("Invalid Solana address: {}", address)),
            None => services.wallet().map(|w| w.public_key().to_string()),
        };

        let token = match args.token.as_deref() {
            Some(key) => Some(services.catalog_interactor().find_token(key).await?),
            None => None,
        };

        let view = Arc::new(ConsoleBalanceView::new(Console::stdout()));
        let presenter = BalancePresenterImpl::new(services.balance_interactor(), view);
        presenter
            .show_balances(
                owner.as_deref(),
                token.as_ref().map(|t| t.address.as_str()),
                token.as_ref().map(|t| t.symbol.as_str()),
            )
            .await
    }
}
