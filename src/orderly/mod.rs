pub mod market_service;
pub mod models;

pub use market_service::{OrderlyMarketService, PerpMarketService};
