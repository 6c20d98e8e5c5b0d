//! Token catalog aggregation.
//!
//! One DexScreener search per configured pair (plus a token lookup for the
//! favorite), filtered by chain, price and 24h volume, merged by base-token
//! address and enriched with decimals/logo from the token list.
//!
//! Merge policy: results are merged in request order into a map keyed by
//! base-token address and a later record replaces an earlier one (last write
//! wins). The replaced entry keeps its original position, which only matters
//! for tokens with equal volume since the list is then sorted by volume.
use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{anyhow, Result};
use futures::stream::{self, StreamExt};
use log::{debug, info, warn};

use crate::config::CatalogConfig;
use crate::entity::{Token, TokenCatalog, DEFAULT_TOKEN_DECIMALS};
use crate::solana::dexscreener::{DexPair, MarketDataSource};
use crate::solana::jupiter::{TokenMetadata, TokenRepository};

pub struct TokenCatalogLoader {
    market_data: Arc<dyn MarketDataSource>,
    token_repository: Arc<dyn TokenRepository>,
    config: CatalogConfig,
    native_mint: String,
}

impl TokenCatalogLoader {
    pub fn new(
        market_data: Arc<dyn MarketDataSource>,
        token_repository: Arc<dyn TokenRepository>,
        config: CatalogConfig,
        native_mint: impl Into<String>,
    ) -> Self {
        Self {
            market_data,
            token_repository,
            config,
            native_mint: native_mint.into(),
        }
    }

    /// Build a fresh catalog. Individual failed requests are skipped; the
    /// call only fails when every request failed.
    pub async fn load(&self) -> Result<TokenCatalog> {
        let metadata = self.token_repository.get_metadata().await;

        let results: Vec<Option<Vec<DexPair>>> = stream::iter(self.config.pairs.clone())
            .map(|pair| {
                let market_data = self.market_data.clone();
                async move {
                    match market_data.search_pairs(&pair).await {
                        Ok(pairs) => Some(pairs),
                        Err(e) => {
                            warn!("Skipping pair {}: {}", pair, e);
                            None
                        }
                    }
                }
            })
            .buffered(self.config.concurrency.max(1))
            .collect()
            .await;

        let favorite = match self.config.favorite_token.as_deref() {
            Some(address) => match self.market_data.token_pairs(address).await {
                Ok(pairs) => Some(pairs),
                Err(e) => {
                    warn!("Skipping favorite token {}: {}", address, e);
                    None
                }
            },
            None => None,
        };

        let requested = results.len() + usize::from(self.config.favorite_token.is_some());
        let succeeded = results.iter().filter(|r| r.is_some()).count() + usize::from(favorite.is_some());
        if requested > 0 && succeeded == 0 {
            return Err(anyhow!("All {} market data requests failed", requested));
        }

        let batches: Vec<Vec<DexPair>> = results.into_iter().flatten().collect();
        let tokens = build_catalog(
            batches,
            favorite.unwrap_or_default(),
            &metadata,
            &self.config,
            &self.native_mint,
        );

        info!(
            "Token catalog loaded: {} tokens from {}/{} requests",
            tokens.len(),
            succeeded,
            requested
        );

        Ok(TokenCatalog::new(tokens))
    }
}

/// Aggregate search results into the ordered token list.
///
/// `batches` are search responses in request order; `favorite_pairs` is the
/// response of the favorite-token lookup and is merged after them.
pub fn build_catalog(
    batches: Vec<Vec<DexPair>>,
    favorite_pairs: Vec<DexPair>,
    metadata: &HashMap<String, TokenMetadata>,
    config: &CatalogConfig,
    native_mint: &str,
) -> Vec<Token> {
    let favorite = config.favorite_token.as_deref();

    let mut merged: Vec<Token> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let mut merge = |token: Token| match index.get(&token.address) {
        Some(&i) => merged[i] = token,
        None => {
            index.insert(token.address.clone(), merged.len());
            merged.push(token);
        }
    };

    for batch in batches {
        batch
            .into_iter()
            .filter(|p| passes_filters(p, config, favorite))
            .take(config.max_pairs_per_query)
            .filter_map(token_from_pair)
            .for_each(&mut merge);
    }

    // The favorite lookup returns every pair the token trades in; keep the
    // busiest one where it is the base token.
    if let Some(address) = favorite {
        let best = favorite_pairs
            .into_iter()
            .filter(|p| p.base_address() == Some(address))
            .filter(|p| p.chain_id == config.chain_id && p.price_usd.is_some())
            .max_by(|a, b| a.volume_24h().total_cmp(&b.volume_24h()));

        if let Some(token) = best.and_then(token_from_pair) {
            merge(token);
        }
    }

    let mut tokens: Vec<Token> = merged
        .into_iter()
        .filter(|t| t.address != native_mint)
        .collect();

    tokens.sort_by(|a, b| b.volume_24h.total_cmp(&a.volume_24h));

    if let Some(address) = favorite {
        if let Some(pos) = tokens.iter().position(|t| t.address == address) {
            let pinned = tokens.remove(pos);
            tokens.insert(0, pinned);
        }
    }

    for token in tokens.iter_mut() {
        match metadata.get(&token.address) {
            Some(meta) => {
                token.decimals = meta.decimals;
                token.logo_uri = meta.logo_uri.clone();
            }
            None => debug!("No metadata for {}, assuming {} decimals", token.symbol, DEFAULT_TOKEN_DECIMALS),
        }
    }

    tokens
}

/// Chain, price and base address must be present; volume must reach the
/// threshold unless the pair's base token is the favorite.
fn passes_filters(pair: &DexPair, config: &CatalogConfig, favorite: Option<&str>) -> bool {
    if pair.chain_id != config.chain_id || pair.price_usd.is_none() || pair.base_address().is_none() {
        return false;
    }
    if favorite.is_some() && pair.base_address() == favorite {
        return true;
    }
    pair.volume_24h() >= config.min_volume_24h
}

fn token_from_pair(pair: DexPair) -> Option<Token> {
    let address = pair.base_address()?.to_string();
    let volume_24h = pair.volume_24h();
    let price_change_24h = pair.price_change_24h();
    let liquidity = pair.liquidity_usd();
    let base = pair.base_token.unwrap_or_default();

    Some(Token {
        address,
        name: if base.name.is_empty() { "Unknown".to_string() } else { base.name },
        symbol: if base.symbol.is_empty() { "???".to_string() } else { base.symbol },
        price: pair.price_usd.unwrap_or(0.0),
        price_change_24h,
        volume_24h,
        liquidity,
        market_cap: pair.fdv,
        decimals: DEFAULT_TOKEN_DECIMALS,
        logo_uri: None,
        dex_id: pair.dex_id,
        pair_url: pair.url,
    })
}
