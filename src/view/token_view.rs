use crate::entity::{Token, TokenCatalog};
use crate::solana::utils::shorten_address;
use crate::view::format::{format_compact_usd, format_percent, format_price};
use crate::view::Console;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait TokenView: Send + Sync {
    async fn display_loading(&self) -> Result<()>;
    async fn display_tokens(&self, tokens: &[Token], total: usize) -> Result<()>;
    async fn display_error(&self, error_message: String) -> Result<()>;
}

pub struct ConsoleTokenView {
    console: Console,
}

impl ConsoleTokenView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

/// One line per token: rank, symbol, price, 24h change, volume, liquidity, mint
pub fn render_token_table(tokens: &[Token], selected: Option<&str>) -> String {
    let mut text = format!(
        "  {:>3}  {:<10} {:>16} {:>9} {:>11} {:>11}  {}\n",
        "#", "TOKEN", "PRICE", "24H", "VOLUME", "LIQUIDITY", "MINT"
    );

    for (i, token) in tokens.iter().enumerate() {
        let marker = if Some(token.address.as_str()) == selected { ">" } else { " " };
        text.push_str(&format!(
            "{} {:>3}  {:<10} {:>16} {:>9} {:>11} {:>11}  {}\n",
            marker,
            i + 1,
            token.symbol,
            format!("${}", format_price(token.price)),
            format_percent(token.price_change_24h),
            format_compact_usd(token.volume_24h),
            format_compact_usd(token.liquidity),
            shorten_address(&token.address),
        ));
    }

    text
}

pub fn render_catalog_summary(catalog: &TokenCatalog) -> String {
    format!(
        "{} tokens (updated {})",
        catalog.len(),
        catalog.loaded_at.format("%H:%M:%S UTC")
    )
}

#[async_trait]
impl TokenView for ConsoleTokenView {
    async fn display_loading(&self) -> Result<()> {
        self.console.print("Loading token markets...")
    }

    async fn display_tokens(&self, tokens: &[Token], total: usize) -> Result<()> {
        if tokens.is_empty() {
            return self.console.print("No tokens match.");
        }

        let mut text = render_token_table(tokens, None);
        if tokens.len() < total {
            text.push_str(&format!("{} of {} tokens shown", tokens.len(), total));
        }
        self.console.print(text.trim_end())
    }

    async fn display_error(&self, error_message: String) -> Result<()> {
        self.console
            .print(&format!("Failed to load tokens: {}", error_message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::CapturedOutput;

    fn token(symbol: &str, price: f64) -> Token {
        Token {
            address: format!("{}111111111111111111111111111111", symbol),
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            price,
            price_change_24h: -2.5,
            volume_24h: 3_400_000.0,
            liquidity: 850_000.0,
            market_cap: None,
            decimals: 6,
            logo_uri: None,
            dex_id: None,
            pair_url: None,
        }
    }

    #[test]
    fn table_marks_selected_row() {
        let tokens = vec![token("JUP", 0.85), token("BONK", 0.0000231)];
        let table = render_token_table(&tokens, Some(&tokens[1].address));

        let rows: Vec<&str> = table.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[1].starts_with("    1  JUP"));
        assert!(rows[2].starts_with(">   2  BONK"));
        assert!(rows[2].contains("$0.000023"));
        assert!(rows[1].contains("-2.50%"));
        assert!(rows[1].contains("$3.40M"));
    }

    #[tokio::test]
    async fn empty_result_says_so() {
        let output = CapturedOutput::default();
        let view = ConsoleTokenView::new(output.console());

        view.display_tokens(&[], 10).await.unwrap();
        assert_eq!(output.text(), "No tokens match.\n");
    }
}
