use serde::Deserialize;

use crate::entity::{OrderBookLevel, PerpMarket, PerpMarketInfo};
use crate::solana::jupiter::models::{opt_string_or_float, string_or_float};

/// Every Orderly public response is wrapped in `{success, data}`
#[derive(Debug, Deserialize)]
pub struct OrderlyEnvelope<T> {
    pub success: bool,
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Rows<T> {
    #[serde(default = "Vec::new")]
    pub rows: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FuturesRow {
    pub symbol: String,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub mark_price: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub index_price: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub est_funding_rate: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub open_interest: Option<f64>,
    #[serde(default, rename = "24h_open", deserialize_with = "opt_string_or_float::deserialize")]
    pub open_24h: Option<f64>,
    #[serde(default, rename = "24h_close", deserialize_with = "opt_string_or_float::deserialize")]
    pub close_24h: Option<f64>,
    #[serde(default, rename = "24h_amount", deserialize_with = "opt_string_or_float::deserialize")]
    pub amount_24h: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub change_24h: Option<f64>,
}

impl FuturesRow {
    /// Percent change over 24h: the reported figure, else derived from open/close
    pub fn change_percent(&self) -> f64 {
        if let Some(change) = self.change_24h {
            return change;
        }
        match (self.open_24h, self.close_24h) {
            (Some(open), Some(close)) if open != 0.0 => (close - open) / open * 100.0,
            _ => 0.0,
        }
    }
}

impl From<FuturesRow> for PerpMarket {
    fn from(row: FuturesRow) -> Self {
        let change_24h = row.change_percent();
        PerpMarket {
            symbol: row.symbol,
            mark_price: row.mark_price.unwrap_or(0.0),
            index_price: row.index_price.unwrap_or(0.0),
            change_24h,
            volume_24h: row.amount_24h.unwrap_or(0.0),
            open_interest: row.open_interest.unwrap_or(0.0),
            funding_rate: row.est_funding_rate,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FundingRateRow {
    pub symbol: String,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub est_funding_rate: Option<f64>,
}

/// Order book level, sent either as `[price, qty]` or `{price, quantity}`
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawLevel {
    Pair(
        #[serde(with = "string_or_float")] f64,
        #[serde(with = "string_or_float")] f64,
    ),
    Object {
        #[serde(with = "string_or_float")]
        price: f64,
        #[serde(with = "string_or_float")]
        quantity: f64,
    },
}

impl From<RawLevel> for OrderBookLevel {
    fn from(level: RawLevel) -> Self {
        match level {
            RawLevel::Pair(price, quantity) | RawLevel::Object { price, quantity } => {
                OrderBookLevel { price, quantity }
            }
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RawOrderBook {
    #[serde(default = "Vec::new")]
    pub asks: Vec<RawLevel>,
    #[serde(default = "Vec::new")]
    pub bids: Vec<RawLevel>,
}

#[derive(Debug, Deserialize)]
pub struct RawMarketInfo {
    pub symbol: String,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub base_min: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub base_max: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub base_tick: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub quote_tick: Option<f64>,
    #[serde(default, deserialize_with = "opt_string_or_float::deserialize")]
    pub base_imr: Option<f64>,
}

impl From<RawMarketInfo> for PerpMarketInfo {
    fn from(raw: RawMarketInfo) -> Self {
        PerpMarketInfo {
            symbol: raw.symbol,
            base_min: raw.base_min,
            base_max: raw.base_max,
            base_tick: raw.base_tick,
            quote_tick: raw.quote_tick,
            max_leverage: raw.base_imr.filter(|imr| *imr > 0.0).map(|imr| 1.0 / imr),
        }
    }
}
