use serde::{Deserialize, Serialize};

/// Symbol used when no perpetual market has been loaded yet
pub const DEFAULT_PERP_SYMBOL: &str = "PERP_SOL_USDC";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpMarket {
    pub symbol: String,
    pub mark_price: f64,
    pub index_price: f64,
    pub change_24h: f64,
    pub volume_24h: f64,
    pub open_interest: f64,
    pub funding_rate: Option<f64>,
}

impl PerpMarket {
    /// `PERP_SOL_USDC` -> `SOL`
    pub fn base_symbol(&self) -> &str {
        base_symbol(&self.symbol)
    }
}

pub fn base_symbol(symbol: &str) -> &str {
    let trimmed = symbol.strip_prefix("PERP_").unwrap_or(symbol);
    trimmed.split('_').next().unwrap_or(trimmed)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderBookLevel {
    pub price: f64,
    pub quantity: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBook {
    pub symbol: String,
    pub asks: Vec<OrderBookLevel>,
    pub bids: Vec<OrderBookLevel>,
}

impl OrderBook {
    pub fn best_bid(&self) -> Option<f64> {
        self.bids.first().map(|l| l.price)
    }

    pub fn best_ask(&self) -> Option<f64> {
        self.asks.first().map(|l| l.price)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerpMarketInfo {
    pub symbol: String,
    pub base_min: Option<f64>,
    pub base_max: Option<f64>,
    pub base_tick: Option<f64>,
    pub quote_tick: Option<f64>,
    pub max_leverage: Option<f64>,
}

/// Sizing for a perpetual order ticket. Computation only, nothing is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerpOrderTicket {
    pub margin: f64,
    pub leverage: u32,
    pub price: f64,
    pub quantity: f64,
    pub notional: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_symbol_strips_prefix_and_quote() {
        assert_eq!(base_symbol("PERP_SOL_USDC"), "SOL");
        assert_eq!(base_symbol("PERP_1000BONK_USDC"), "1000BONK");
        assert_eq!(base_symbol("ETH"), "ETH");
    }
}
