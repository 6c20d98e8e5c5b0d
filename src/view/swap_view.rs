use crate::entity::{Quote, QuoteInput, QuoteState, SwapOutcome, TradeSide};
use crate::view::format::format_amount;
use crate::view::Console;
use anyhow::Result;
use async_trait::async_trait;

#[async_trait]
pub trait SwapView: Send + Sync {
    async fn display_quote(&self, input: &QuoteInput, state: &QuoteState) -> Result<()>;
    async fn display_processing(&self, quote: &Quote) -> Result<()>;
    async fn display_swap_success(&self, outcome: &SwapOutcome) -> Result<()>;
    async fn display_swap_error(&self, error_message: String) -> Result<()>;
    async fn display_validation_error(&self, error_message: String) -> Result<()>;
}

pub struct ConsoleSwapView {
    console: Console,
}

impl ConsoleSwapView {
    pub fn new(console: Console) -> Self {
        Self { console }
    }
}

/// Symbols of the (paid, received) tokens for an input
fn leg_symbols(input: &QuoteInput) -> (String, String) {
    let token = input
        .token
        .as_ref()
        .map(|t| t.symbol.clone())
        .unwrap_or_else(|| "?".to_string());
    match input.side {
        TradeSide::Buy => ("SOL".to_string(), token),
        TradeSide::Sell => (token, "SOL".to_string()),
    }
}

pub fn render_quote(input: &QuoteInput, state: &QuoteState) -> String {
    let (pay, receive) = leg_symbols(input);
    match state {
        QuoteState::Idle => "Enter an amount to get a quote".to_string(),
        QuoteState::Pending => format!("Quoting {} {} -> {}...", format_amount(input.amount), pay, receive),
        QuoteState::Ready(quote) => format!(
            "{} {} {} -> {} {} (slippage {:.2}%)",
            input.side,
            format_amount(input.amount),
            pay,
            format_amount(quote.ui_out_amount),
            receive,
            quote.slippage_bps as f64 / 100.0
        ),
        QuoteState::Failed(message) => format!("Quote failed: {}", message),
    }
}

pub fn render_swap_success(outcome: &SwapOutcome) -> String {
    format!(
        "Swap submitted\nSignature: {}\nhttps://solscan.io/tx/{}",
        outcome.signature, outcome.signature
    )
}

#[async_trait]
impl SwapView for ConsoleSwapView {
    async fn display_quote(&self, input: &QuoteInput, state: &QuoteState) -> Result<()> {
        self.console.print(&render_quote(input, state))
    }

    async fn display_processing(&self, quote: &Quote) -> Result<()> {
        let (pay, receive) = leg_symbols(&quote.input);
        self.console.print(&format!(
            "Signing and sending swap of {} {} for {}...",
            format_amount(quote.input.amount),
            pay,
            receive
        ))
    }

    async fn display_swap_success(&self, outcome: &SwapOutcome) -> Result<()> {
        self.console.print(&render_swap_success(outcome))
    }

    async fn display_swap_error(&self, error_message: String) -> Result<()> {
        self.console.print(&format!("Swap failed: {}", error_message))
    }

    async fn display_validation_error(&self, error_message: String) -> Result<()> {
        self.console.print(&format!("Cannot swap: {}", error_message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{QuoteToken, SlippageTolerance};

    fn input(side: TradeSide) -> QuoteInput {
        QuoteInput::new(
            side,
            1.5,
            Some(QuoteToken {
                address: "mint".to_string(),
                symbol: "JUP".to_string(),
                decimals: 6,
            }),
            SlippageTolerance::from_bps(100),
        )
    }

    #[test]
    fn ready_quote_shows_both_legs() {
        let input = input(TradeSide::Sell);
        let state = QuoteState::Ready(Quote {
            input: input.clone(),
            input_mint: "mint".to_string(),
            output_mint: "sol".to_string(),
            in_amount: 1_500_000,
            out_amount: 9_000_000,
            ui_out_amount: 0.009,
            slippage_bps: 100,
            response: serde_json::json!({}),
        });

        assert_eq!(
            render_quote(&input, &state),
            "SELL 1.5000 JUP -> 0.009000 SOL (slippage 1.00%)"
        );
    }

    #[test]
    fn failure_shows_message() {
        let text = render_quote(&input(TradeSide::Buy), &QuoteState::Failed("No routes found".to_string()));
        assert_eq!(text, "Quote failed: No routes found");
    }
}
