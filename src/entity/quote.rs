use serde::{Deserialize, Serialize};

use crate::entity::{SlippageTolerance, Token, TradeSide};

/// The part of a catalog token a quote depends on. Price refreshes do not change it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteToken {
    pub address: String,
    pub symbol: String,
    pub decimals: u8,
}

impl From<&Token> for QuoteToken {
    fn from(token: &Token) -> Self {
        Self {
            address: token.address.clone(),
            symbol: token.symbol.clone(),
            decimals: token.decimals,
        }
    }
}

/// Inputs a quote depends on. Any change invalidates the current quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInput {
    pub side: TradeSide,
    pub amount: f64,
    pub token: Option<QuoteToken>,
    pub slippage: SlippageTolerance,
}

impl QuoteInput {
    pub fn new(
        side: TradeSide,
        amount: f64,
        token: Option<QuoteToken>,
        slippage: SlippageTolerance,
    ) -> Self {
        Self {
            side,
            amount,
            token,
            slippage,
        }
    }

    /// True when the input could produce a quote request at all
    pub fn is_quotable(&self) -> bool {
        self.amount.is_finite() && self.amount > 0.0 && self.token.is_some()
    }
}

/// Priced offer from the aggregator, held until it is replayed into the swap build
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub input: QuoteInput,
    pub input_mint: String,
    pub output_mint: String,
    pub in_amount: u64,        // Raw input amount, smallest units
    pub out_amount: u64,       // Raw output amount, smallest units
    pub ui_out_amount: f64,    // Output scaled by the output token decimals
    pub slippage_bps: u16,
    pub response: serde_json::Value, // Aggregator response, kept verbatim
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum QuoteState {
    #[default]
    Idle,
    Pending,
    Ready(Quote),
    Failed(String),
}

impl QuoteState {
    pub fn quote(&self) -> Option<&Quote> {
        match self {
            QuoteState::Ready(quote) => Some(quote),
            _ => None,
        }
    }
}
