use crate::interactor::balance_interactor::BalanceInteractor;
use crate::view::balance_view::BalanceView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait BalancePresenter: Send + Sync {
    /// `owner` is `None` when no wallet is connected
    async fn show_balances(
        &self,
        owner: Option<&str>,
        token_mint: Option<&str>,
        token_symbol: Option<&str>,
    ) -> Result<()>;
}

pub struct BalancePresenterImpl<V> {
    interactor: Arc<dyn BalanceInteractor>,
    view: Arc<V>,
}

impl<V> BalancePresenterImpl<V>
where
    V: BalanceView,
{
    pub fn new(interactor: Arc<dyn BalanceInteractor>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<V> BalancePresenter for BalancePresenterImpl<V>
where
    V: BalanceView + Send + Sync,
{
    async fn show_balances(
        &self,
        owner: Option<&str>,
        token_mint: Option<&str>,
        token_symbol: Option<&str>,
    ) -> Result<()> {
        let owner = match owner {
            Some(owner) => owner,
            None => return self.view.display_no_wallet().await,
        };

        match self.interactor.get_balances(owner, token_mint).await {
            Ok(balances) => self.view.display_balances(&balances, token_symbol).await?,
            Err(e) => self.view.display_error(e.to_string()).await?,
        }

        Ok(())
    }
}
