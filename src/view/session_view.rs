use crate::entity::{TerminalState, ViewMode};
use crate::view::balance_view::render_balances;
use crate::view::format::{format_compact_usd, format_percent, format_price};
use crate::view::perp_view::{render_markets, render_order_book};
use crate::view::swap_view::render_quote;
use crate::view::token_view::{render_catalog_summary, render_token_table};
use crate::view::Console;
use anyhow::Result;
use async_trait::async_trait;

/// Rows of the token table shown on the spot screen
const SPOT_TABLE_ROWS: usize = 12;

#[async_trait]
pub trait SessionView: Send + Sync {
    async fn display_state(&self, state: &TerminalState) -> Result<()>;
    async fn display_help(&self, commands: &[(&'static str, &'static str)]) -> Result<()>;
    async fn display_message(&self, text: &str) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct ConsoleSessionView {
    console: Console,
}

impl ConsoleSessionView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

pub fn render_state(state: &TerminalState) -> String {
    match state.view_mode {
        ViewMode::Spot => render_spot(state),
        ViewMode::Perps => render_perps(state),
    }
}

fn render_spot(state: &TerminalState) -> String {
    let mut text = format!("== SPOT == {}\n", render_catalog_summary(&state.catalog));

    let selected = state.selected_token.as_ref().map(|t| t.address.as_str());
    let rows = state.catalog.tokens.len().min(SPOT_TABLE_ROWS);
    text.push_str(&render_token_table(&state.catalog.tokens[..rows], selected));

    match &state.selected_token {
        Some(token) => {
            text.push_str(&format!(
                "\n{} ({}) ${} {} | vol {} | liq {}",
                token.symbol,
                token.name,
                format_price(token.price),
                format_percent(token.price_change_24h),
                format_compact_usd(token.volume_24h),
                format_compact_usd(token.liquidity),
            ));
            if let Some(mc) = token.market_cap {
                text.push_str(&format!(" | mcap {}", format_compact_usd(mc)));
            }
            text.push('\n');
        }
        None => text.push_str("\nNo token selected\n"),
    }

    text.push_str(&format!(
        "Order: {} {} | slippage {:.2}%\n",
        state.side,
        state.amount,
        state.slippage.percent()
    ));
    text.push_str(&render_quote(&state.quote_input(), &state.quote));
    text.push('\n');

    if let Some(balances) = &state.balances {
        let symbol = state.selected_token.as_ref().map(|t| t.symbol.as_str());
        text.push_str(&render_balances(balances, symbol));
        text.push('\n');
    }

    if let Some(signature) = &state.last_signature {
        text.push_str(&format!("Last swap: {}\n", signature));
    }

    text
}

fn render_perps(state: &TerminalState) -> String {
    let mut text = "== PERPS ==\n".to_string();
    text.push_str(&render_markets(&state.perp_markets, &state.selected_perp));

    match state.selected_perp_market() {
        Some(market) => text.push_str(&format!(
            "\n{} mark {} index {}\n",
            market.base_symbol(),
            format_price(market.mark_price),
            format_price(market.index_price)
        )),
        None => text.push_str(&format!("\n{} (loading)\n", state.selected_perp)),
    }

    if let Some(book) = &state.order_book {
        text.push('\n');
        text.push_str(&render_order_book(book));
    }

    text
}

pub fn render_help(commands: &[(&'static str, &'static str)]) -> String {
    let width = commands.iter().map(|(name, _)| name.len()).max().unwrap_or(0);
    commands
        .iter()
        .map(|(name, description)| format!("  {:<width$}  {}", name, description, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

#[async_trait]
impl SessionView for ConsoleSessionView {
    async fn display_state(&self, state: &TerminalState) -> Result<()> {
        self.console.print(render_state(state).trim_end())
    }

    async fn display_help(&self, commands: &[(&'static str, &'static str)]) -> Result<()> {
        self.console
            .print(&format!("Commands:\n{}", render_help(commands)))
    }

    async fn display_message(&self, text: &str) -> Result<()> {
        self.console.print(text)
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.console.print(&format!("Error: {}", error_message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{Token, TokenCatalog};

    #[test]
    fn spot_screen_shows_selection_and_idle_quote() {
        let mut state = TerminalState::default();
        state.apply_catalog(TokenCatalog::new(vec![Token {
            address: "JUPyiwrYJFskUPiHa7hkeR8VUtAeFoSYbKedZNsDvCN".to_string(),
            name: "Jupiter".to_string(),
            symbol: "JUP".to_string(),
            price: 0.85,
            price_change_24h: 4.0,
            volume_24h: 25_000_000.0,
            liquidity: 4_000_000.0,
            market_cap: Some(1_200_000_000.0),
            decimals: 6,
            logo_uri: None,
            dex_id: None,
            pair_url: None,
        }]));

        let text = render_state(&state);
        assert!(text.starts_with("== SPOT == 1 tokens"));
        assert!(text.contains("JUP (Jupiter) $0.8500 +4.00%"));
        assert!(text.contains("mcap $1.20B"));
        assert!(text.contains("Order: BUY 0 | slippage 0.50%"));
        assert!(text.contains("Enter an amount to get a quote"));
    }

    #[test]
    fn perps_screen_waits_for_markets() {
        let state = TerminalState {
            view_mode: ViewMode::Perps,
            ..TerminalState::default()
        };
        assert!(render_state(&state).contains("PERP_SOL_USDC (loading)"));
    }

    #[test]
    fn help_aligns_descriptions() {
        let text = render_help(&[("buy", "switch to buy"), ("tokens", "list tokens")]);
        assert_eq!(text, "  buy     switch to buy\n  tokens  list tokens");
    }
}
