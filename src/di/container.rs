use std::sync::Arc;

use anyhow::{Context, Result};
use log::{info, warn};
use solana_client::nonblocking::rpc_client::RpcClient;

use crate::config::AppConfig;
use crate::interactor::balance_interactor::{BalanceInteractor, BalanceInteractorImpl};
use crate::interactor::catalog_interactor::{CatalogInteractor, CatalogInteractorImpl};
use crate::interactor::perp_interactor::{PerpInteractor, PerpInteractorImpl};
use crate::interactor::swap_interactor::{SwapInteractor, SwapInteractorImpl};
use crate::orderly::{OrderlyMarketService, PerpMarketService};
use crate::services::catalog_service::TokenCatalogLoader;
use crate::solana::dexscreener::{DexScreenerClient, MarketDataSource};
use crate::solana::jupiter::{
    JupiterQuoteService, JupiterSwapService, JupiterTokenRepository, QuoteService, SwapService,
    TokenRepository,
};
use crate::solana::{create_http_client, create_solana_client, KeypairWallet, WalletAdapter};

/// Environment variable holding the base58-encoded wallet keypair
pub const WALLET_KEY_ENV: &str = "WALLET_PRIVATE_KEY";

/// ServiceContainer provides access to core application dependencies
pub struct ServiceContainer {
    config: AppConfig,

    // Core services
    solana_client: Arc<RpcClient>,
    wallet: Option<Arc<dyn WalletAdapter>>,

    // Remote APIs
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapService>,
    perp_market_service: Arc<dyn PerpMarketService>,

    catalog_loader: Arc<TokenCatalogLoader>,
}

impl ServiceContainer {
    /// Build every service from configuration. The wallet is read from
    /// `WALLET_PRIVATE_KEY` when set.
    pub fn new(config: AppConfig) -> Result<Self> {
        let wallet = load_wallet_from_env()?;
        Self::with_wallet(config, wallet)
    }

    pub fn with_wallet(config: AppConfig, wallet: Option<Arc<dyn WalletAdapter>>) -> Result<Self> {
        let http_client = create_http_client(&config.http)?;
        let solana_client = create_solana_client(&config.rpc.url)?;

        let market_data = Arc::new(DexScreenerClient::new(
            http_client.clone(),
            config.dexscreener.clone(),
        )) as Arc<dyn MarketDataSource>;

        let token_repository = Arc::new(JupiterTokenRepository::new(
            http_client.clone(),
            config.jupiter.clone(),
        )) as Arc<dyn TokenRepository>;

        let quote_service = Arc::new(JupiterQuoteService::new(
            http_client.clone(),
            config.jupiter.clone(),
        )) as Arc<dyn QuoteService>;

        let swap_service = Arc::new(JupiterSwapService::new(
            http_client.clone(),
            config.jupiter.clone(),
        )) as Arc<dyn SwapService>;

        let perp_market_service = Arc::new(OrderlyMarketService::new(
            http_client,
            config.orderly.clone(),
        )) as Arc<dyn PerpMarketService>;

        let catalog_loader = Arc::new(TokenCatalogLoader::new(
            market_data,
            token_repository,
            config.catalog.clone(),
            config.jupiter.sol_token_address.clone(),
        ));

        match &wallet {
            Some(wallet) => info!("Wallet connected: {}", wallet.public_key()),
            None => info!("No wallet connected, trading is disabled"),
        }

        Ok(Self {
            config,
            solana_client,
            wallet,
            quote_service,
            swap_service,
            perp_market_service,
            catalog_loader,
        })
    }

    // Accessor methods

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn wallet(&self) -> Option<Arc<dyn WalletAdapter>> {
        self.wallet.clone()
    }

    // Interactors

    pub fn catalog_interactor(&self) -> Arc<dyn CatalogInteractor> {
        Arc::new(CatalogInteractorImpl::new(self.catalog_loader.clone()))
    }

    pub fn swap_interactor(&self) -> Arc<dyn SwapInteractor> {
        Arc::new(SwapInteractorImpl::new(
            self.quote_service.clone(),
            self.swap_service.clone(),
            self.solana_client.clone(),
            self.config.jupiter.sol_token_address.clone(),
            self.config.rpc.skip_preflight,
        ))
    }

    pub fn balance_interactor(&self) -> Arc<dyn BalanceInteractor> {
        Arc::new(BalanceInteractorImpl::new(self.solana_client.clone()))
    }

    pub fn perp_interactor(&self) -> Arc<dyn PerpInteractor> {
        Arc::new(PerpInteractorImpl::new(
            self.perp_market_service.clone(),
            self.config.orderly.orderbook_depth,
        ))
    }
}

/// Read the wallet keypair from the environment. An unset or empty variable
/// means no wallet; a malformed key is an error.
pub fn load_wallet_from_env() -> Result<Option<Arc<dyn WalletAdapter>>> {
    match std::env::var(WALLET_KEY_ENV) {
        Ok(key) if !key.trim().is_empty() => {
            let wallet = KeypairWallet::from_base58(&key)
                .with_context(|| format!("{} is not a valid base58 keypair", WALLET_KEY_ENV))?;
            Ok(Some(Arc::new(wallet)))
        }
        Ok(_) => {
            warn!("{} is set but empty", WALLET_KEY_ENV);
            Ok(None)
        }
        Err(_) => Ok(None),
    }
}
