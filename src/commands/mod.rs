//! Command-line interface definitions.
use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;

use crate::di::ServiceContainer;
use crate::entity::TradeSide;

pub mod balance;
pub mod perps;
pub mod session;
pub mod swap;
pub mod tokens;

/// Solana spot terminal: token markets, Jupiter swaps and Orderly perp data
#[derive(Parser, Debug)]
#[command(name = "spot-terminal")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./spot-terminal.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the token catalog, optionally filtered by symbol or name
    Tokens(tokens::TokensArgs),

    /// Reprint the token catalog on every refresh until interrupted
    Watch(tokens::WatchArgs),

    /// Get a swap quote without trading
    Quote(OrderArgs),

    /// Quote, sign and send a swap with the configured wallet
    Swap(swap::SwapArgs),

    /// Show the top perpetual markets
    Perps(perps::PerpsArgs),

    /// Show the order book of a perpetual market
    Orderbook(perps::OrderbookArgs),

    /// Size a perpetual order from margin and leverage
    Ticket(perps::TicketArgs),

    /// Show wallet balances
    Balance(balance::BalanceArgs),

    /// Interactive terminal session
    Session,
}

/// Side, amount and token shared by `quote` and `swap`
#[derive(Args, Debug, Clone)]
pub struct OrderArgs {
    /// buy (SOL -> token) or sell (token -> SOL)
    pub side: TradeSide,

    /// Amount of the paid asset: SOL when buying, the token when selling
    pub amount: f64,

    /// Token symbol or mint address from the catalog
    pub token: String,

    /// Slippage tolerance in percent (minimum 1%)
    #[arg(long)]
    pub slippage: Option<f64>,
}

/// Trait that defines a command handler
pub trait CommandHandler {
    type Args;

    /// The command name in lowercase
    fn command_name() -> &'static str;

    /// The command description for help
    fn description() -> &'static str;

    /// Execute the command
    async fn execute(args: Self::Args, services: Arc<ServiceContainer>) -> Result<()>;
}
