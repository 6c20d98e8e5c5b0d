mod perp;
mod quote;
mod slippage;
mod state;
mod swap_result;
mod terminal_error;
mod token;
mod trade_side;
mod wallet_balances;

pub use perp::{
    base_symbol, OrderBook, OrderBookLevel, PerpMarket, PerpMarketInfo, PerpOrderTicket,
    DEFAULT_PERP_SYMBOL,
};
pub use quote::{Quote, QuoteInput, QuoteState, QuoteToken};
pub use slippage::{SlippageTolerance, DEFAULT_SLIPPAGE_BPS, MIN_USER_SLIPPAGE_PERCENT};
pub use state::{amount_from_percent, TerminalState, ViewMode};
pub use swap_result::SwapOutcome;
pub use terminal_error::TerminalError;
pub use token::{Token, TokenCatalog, DEFAULT_TOKEN_DECIMALS};
pub use trade_side::TradeSide;
pub use wallet_balances::WalletBalances;
