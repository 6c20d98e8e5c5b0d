use crate::entity::DEFAULT_PERP_SYMBOL;
use crate::interactor::perp_interactor::{build_order_ticket, PerpInteractor};
use crate::view::perp_view::PerpView;
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait PerpPresenter: Send + Sync {
    async fn show_markets(&self) -> Result<()>;
    async fn show_order_book(&self, symbol: &str) -> Result<()>;
    async fn show_market_info(&self, symbol: &str) -> Result<()>;
    async fn show_ticket(&self, symbol: &str, margin: f64, leverage: u32) -> Result<()>;
}

pub struct PerpPresenterImpl<V> {
    interactor: Arc<dyn PerpInteractor>,
    view: Arc<V>,
}

impl<V> PerpPresenterImpl<V>
where
    V: PerpView,
{
    pub fn new(interactor: Arc<dyn PerpInteractor>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<V> PerpPresenter for PerpPresenterImpl<V>
where
    V: PerpView + Send + Sync,
{
    async fn show_markets(&self) -> Result<()> {
        match self.interactor.load_markets().await {
            Ok(markets) => {
                let selected = markets
                    .iter()
                    .find(|m| m.symbol == DEFAULT_PERP_SYMBOL)
                    .or_else(|| markets.first())
                    .map(|m| m.symbol.clone())
                    .unwrap_or_default();
                self.view.display_markets(&markets, &selected).await?;
            }
            Err(e) => self.view.display_error(e.to_string()).await?,
        }
        Ok(())
    }

    async fn show_order_book(&self, symbol: &str) -> Result<()> {
        match self.interactor.get_order_book(symbol).await {
            Ok(book) => self.view.display_order_book(&book).await?,
            Err(e) => self.view.display_error(e.to_string()).await?,
        }
        Ok(())
    }

    async fn show_market_info(&self, symbol: &str) -> Result<()> {
        match self.interactor.get_market_info(symbol).await {
            Ok(info) => self.view.display_market_info(&info).await?,
            Err(e) => self.view.display_error(e.to_string()).await?,
        }
        Ok(())
    }

    async fn show_ticket(&self, symbol: &str, margin: f64, leverage: u32) -> Result<()> {
        let ticket = async {
            let markets = self.interactor.load_markets().await?;
            let market = markets
                .iter()
                .find(|m| m.symbol == symbol)
                .ok_or_else(|| anyhow!("Market {} not found", symbol))?;
            build_order_ticket(margin, leverage, market.mark_price)
        }
        .await;

        match ticket {
            Ok(ticket) => self.view.display_ticket(symbol, &ticket).await?,
            Err(e) => self.view.display_error(e.to_string()).await?,
        }
        Ok(())
    }
}
