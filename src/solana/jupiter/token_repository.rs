// src/solana/jupiter/token_repository.rs
use crate::entity::TerminalError;
use crate::solana::jupiter::{Config, JupiterToken};
use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Decimals and logo for a token, keyed by mint address in the metadata map
#[derive(Debug, Clone, PartialEq)]
pub struct TokenMetadata {
    pub decimals: u8,
    pub logo_uri: Option<String>,
}

/// Repository for token metadata (decimals, logos)
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Fetch the full token list from the remote source
    async fn get_token_list(&self) -> Result<Vec<JupiterToken>>;

    /// Metadata keyed by address. Never fails: a failed load yields an empty map.
    async fn get_metadata(&self) -> HashMap<String, TokenMetadata>;
}

/// Jupiter token list repository. The list is fetched once and cached;
/// a failed fetch is retried on the next call.
pub struct JupiterTokenRepository {
    http_client: Client,
    config: Config,
    metadata_cache: Arc<RwLock<Option<HashMap<String, TokenMetadata>>>>,
}

impl JupiterTokenRepository {
    pub fn new(http_client: Client, config: Config) -> Self {
        Self {
            http_client,
            config,
            metadata_cache: Arc::new(RwLock::new(None)),
        }
    }
}

pub fn index_token_list(tokens: Vec<JupiterToken>) -> HashMap<String, TokenMetadata> {
    tokens
        .into_iter()
        .map(|t| {
            (
                t.address,
                TokenMetadata {
                    decimals: t.decimals,
                    logo_uri: t.logo_uri,
                },
            )
        })
        .collect()
}

#[async_trait]
impl TokenRepository for JupiterTokenRepository {
    async fn get_token_list(&self) -> Result<Vec<JupiterToken>> {
        debug!("Requesting token list from: {}", self.config.token_list_url);

        let response = self
            .http_client
            .get(&self.config.token_list_url)
            .send()
            .await
            .map_err(TerminalError::Http)?;

        if !response.status().is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(TerminalError::api("Jupiter", error_text).into());
        }

        let tokens: Vec<JupiterToken> = response
            .json()
            .await
            .map_err(|e| TerminalError::Decode(format!("token list: {}", e)))?;

        info!("Loaded {} tokens from Jupiter token list", tokens.len());
        Ok(tokens)
    }

    async fn get_metadata(&self) -> HashMap<String, TokenMetadata> {
        {
            let cache = self.metadata_cache.read().await;
            if let Some(metadata) = cache.as_ref() {
                return metadata.clone();
            }
        }

        match self.get_token_list().await {
            Ok(tokens) => {
                let metadata = index_token_list(tokens);
                *self.metadata_cache.write().await = Some(metadata.clone());
                metadata
            }
            Err(e) => {
                warn!("Token list unavailable, continuing without metadata: {}", e);
                HashMap::new()
            }
        }
    }
}
