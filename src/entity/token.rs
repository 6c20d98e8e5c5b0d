use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Decimals assumed for a token missing from the metadata list.
pub const DEFAULT_TOKEN_DECIMALS: u8 = 9;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub address: String,          // Base token mint address
    pub name: String,             // Full token name
    pub symbol: String,           // Token symbol (e.g. "JUP")
    pub price: f64,               // Price in USD
    pub price_change_24h: f64,    // 24h change, percent
    pub volume_24h: f64,          // 24h volume in USD
    pub liquidity: f64,           // Pool liquidity in USD
    pub market_cap: Option<f64>,  // Fully diluted valuation, if reported
    pub decimals: u8,             // Number of decimal places
    pub logo_uri: Option<String>, // Token logo URI
    pub dex_id: Option<String>,   // DEX the winning pair trades on
    pub pair_url: Option<String>, // DexScreener pair page
}

impl Token {
    /// Case-insensitive match against symbol or name.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.symbol.to_lowercase().contains(&query) || self.name.to_lowercase().contains(&query)
    }
}

/// One refresh worth of tokens. Rebuilt wholesale on every cycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCatalog {
    pub tokens: Vec<Token>,
    pub loaded_at: DateTime<Utc>,
}

impl TokenCatalog {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            loaded_at: Utc::now(),
        }
    }

    pub fn get(&self, address: &str) -> Option<&Token> {
        self.tokens.iter().find(|t| t.address == address)
    }

    /// Look up by mint address, then by symbol (case-insensitive)
    pub fn find(&self, key: &str) -> Option<&Token> {
        self.get(key).or_else(|| {
            self.tokens
                .iter()
                .find(|t| t.symbol.eq_ignore_ascii_case(key))
        })
    }

    pub fn first(&self) -> Option<&Token> {
        self.tokens.first()
    }

    pub fn search(&self, query: &str) -> Vec<&Token> {
        self.tokens.iter().filter(|t| t.matches(query)).collect()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
