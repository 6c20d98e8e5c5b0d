pub mod market_data_service;
pub mod models;

pub use market_data_service::{DexScreenerClient, MarketDataSource};
pub use models::{DexPair, DexPairsResponse, DexTokenRef};
