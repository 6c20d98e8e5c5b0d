use crate::entity::{base_symbol, OrderBook, PerpMarket, PerpMarketInfo, PerpOrderTicket};
use crate::view::format::{format_compact_usd, format_funding_rate, format_percent, format_price};
use crate::view::Console;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait PerpView: Send + Sync {
    async fn display_markets(&self, markets: &[PerpMarket], selected: &str) -> Result<()>;
    async fn display_order_book(&self, book: &OrderBook) -> Result<()>;
    async fn display_market_info(&self, info: &PerpMarketInfo) -> Result<()>;
    async fn display_ticket(&self, symbol: &str, ticket: &PerpOrderTicket) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct ConsolePerpView {
    console: Console,
}

impl ConsolePerpView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

pub fn render_markets(markets: &[PerpMarket], selected: &str) -> String {
    let mut text = format!(
        "  {:<9} {:>14} {:>9} {:>11} {:>11} {:>10}\n",
        "MARKET", "MARK", "24H", "VOLUME", "OI", "FUNDING"
    );

    for market in markets {
        let marker = if market.symbol == selected { ">" } else { " " };
        text.push_str(&format!(
            "{} {:<9} {:>14} {:>9} {:>11} {:>11} {:>10}\n",
            marker,
            market.base_symbol(),
            format_price(market.mark_price),
            format_percent(market.change_24h),
            format_compact_usd(market.volume_24h),
            format_compact_usd(market.open_interest * market.mark_price),
            format_funding_rate(market.funding_rate),
        ));
    }

    text
}

/// Asks above bids, best prices nearest the spread line
pub fn render_order_book(book: &OrderBook) -> String {
    let mut text = format!("{} order book\n{:>14} {:>14}\n", base_symbol(&book.symbol), "PRICE", "SIZE");

    for level in book.asks.iter().rev() {
        text.push_str(&format!("{:>14} {:>14.4}  ask\n", format_price(level.price), level.quantity));
    }

    let spread = match (book.best_ask(), book.best_bid()) {
        (Some(ask), Some(bid)) => format!("spread {}", format_price(ask - bid)),
        _ => "spread -".to_string(),
    };
    text.push_str(&format!("{:-^30}\n", format!(" {} ", spread)));

    for level in &book.bids {
        text.push_str(&format!("{:>14} {:>14.4}  bid\n", format_price(level.price), level.quantity));
    }

    text
}

pub fn render_market_info(info: &PerpMarketInfo) -> String {
    let field = |v: Option<f64>| v.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string());
    format!(
        "{}\nmin size: {}\nmax size: {}\nsize step: {}\nprice step: {}\nmax leverage: {}",
        info.symbol,
        field(info.base_min),
        field(info.base_max),
        field(info.base_tick),
        field(info.quote_tick),
        info.max_leverage
            .map(|l| format!("{:.0}x", l))
            .unwrap_or_else(|| "-".to_string()),
    )
}

#[async_trait]
impl PerpView for ConsolePerpView {
    async fn display_markets(&self, markets: &[PerpMarket], selected: &str) -> Result<()> {
        if markets.is_empty() {
            return self.console.print("No perpetual markets available.");
        }
        self.console.print(render_markets(markets, selected).trim_end())
    }

    async fn display_order_book(&self, book: &OrderBook) -> Result<()> {
        self.console.print(render_order_book(book).trim_end())
    }

    async fn display_market_info(&self, info: &PerpMarketInfo) -> Result<()> {
        self.console.print(&render_market_info(info))
    }

    async fn display_ticket(&self, symbol: &str, ticket: &PerpOrderTicket) -> Result<()> {
        self.console.print(&format!(
            "{} ticket: margin ${:.2} x{} @ {} -> size {:.4} {} (notional {})",
            symbol,
            ticket.margin,
            ticket.leverage,
            format_price(ticket.price),
            ticket.quantity,
            base_symbol(symbol),
            format_compact_usd(ticket.notional),
        ))
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.console
            .print(&format!("Perp market data unavailable: {}", error_message))
    }
}
