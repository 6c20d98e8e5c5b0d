use crate::entity::{Token, TokenCatalog};
use crate::services::catalog_service::TokenCatalogLoader;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait CatalogInteractor: Send + Sync {
    async fn load_catalog(&self) -> Result<TokenCatalog>;

    /// Load a fresh catalog and return the tokens matching `query`
    /// (symbol or name, case-insensitive). An empty query returns everything.
    async fn search_tokens(&self, query: &str) -> Result<Vec<Token>>;

    /// Resolve a mint address or symbol against a fresh catalog
    async fn find_token(&self, key: &str) -> Result<Token>;
}

pub struct CatalogInteractorImpl {
    loader: Arc<TokenCatalogLoader>,
}

impl CatalogInteractorImpl {
    pub fn new(loader: Arc<TokenCatalogLoader>) -> Self {
        Self { loader }
    }
}

#[async_trait]
impl CatalogInteractor for CatalogInteractorImpl {
    async fn load_catalog(&self) -> Result<TokenCatalog> {
        self.loader.load().await
    }

    async fn search_tokens(&self, query: &str) -> Result<Vec<Token>> {
        let catalog = self.loader.load().await?;
        Ok(catalog.search(query).into_iter().cloned().collect())
    }

    async fn find_token(&self, key: &str) -> Result<Token> {
        let catalog = self.loader.load().await?;
        catalog
            .find(key)
            .cloned()
            .ok_or_else(|| anyhow!("Token {} is not in the current catalog", key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CatalogConfig;
    use crate::solana::dexscreener::models::{DexTokenRef, DexWindow};
    use crate::solana::dexscreener::{DexPair, MarketDataSource};
    use crate::solana::jupiter::{JupiterToken, TokenMetadata, TokenRepository, SOL_MINT};
    use std::collections::HashMap;

    struct OnePairPerQuery;

    #[async_trait]
    impl MarketDataSource for OnePairPerQuery {
        async fn search_pairs(&self, query: &str) -> Result<Vec<DexPair>> {
            let symbol = query.split('/').next().unwrap_or(query).to_string();
            Ok(vec![DexPair {
                chain_id: "solana".to_string(),
                base_token: Some(DexTokenRef {
                    address: format!("{}-mint", symbol),
                    name: symbol.clone(),
                    symbol,
                }),
                price_usd: Some(1.0),
                volume: Some(DexWindow { h24: Some(250_000.0) }),
                ..DexPair::default()
            }])
        }

        async fn token_pairs(&self, _address: &str) -> Result<Vec<DexPair>> {
            Ok(Vec::new())
        }
    }

    struct NoMetadata;

    #[async_trait]
    impl TokenRepository for NoMetadata {
        async fn get_token_list(&self) -> Result<Vec<JupiterToken>> {
            Ok(Vec::new())
        }

        async fn get_metadata(&self) -> HashMap<String, TokenMetadata> {
            HashMap::new()
        }
    }

    fn interactor() -> Arc<dyn CatalogInteractor> {
        let config = CatalogConfig {
            pairs: vec!["JUP/USDC".to_string(), "BONK/USDC".to_string(), "WIF/USDC".to_string()],
            concurrency: 2,
            ..CatalogConfig::default()
        };
        let loader = TokenCatalogLoader::new(Arc::new(OnePairPerQuery), Arc::new(NoMetadata), config, SOL_MINT);
        Arc::new(CatalogInteractorImpl::new(Arc::new(loader)))
    }

    #[tokio::test]
    async fn catalog_loads_from_a_spawned_task() {
        let interactor = interactor();

        let catalog = tokio::spawn(async move { interactor.load_catalog().await })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(catalog.len(), 3);
    }

    #[tokio::test]
    async fn find_token_by_symbol_or_mint() {
        let interactor = interactor();

        assert_eq!(interactor.find_token("bonk").await.unwrap().address, "BONK-mint");
        assert_eq!(interactor.find_token("WIF-mint").await.unwrap().symbol, "WIF");
        assert!(interactor.find_token("DOGE").await.is_err());
        assert_eq!(interactor.search_tokens("ju").await.unwrap().len(), 1);
    }
}
