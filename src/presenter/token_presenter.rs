use crate::interactor::catalog_interactor::CatalogInteractor;
use crate::view::token_view::TokenView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait TokenPresenter: Send + Sync {
    async fn show_tokens(&self, query: Option<&str>, limit: usize) -> Result<()>;
}

pub struct TokenPresenterImpl<V> {
    interactor: Arc<dyn CatalogInteractor>,
    view: Arc<V>,
}

impl<V> TokenPresenterImpl<V>
where
    V: TokenView,
{
    pub fn new(interactor: Arc<dyn CatalogInteractor>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<V> TokenPresenter for TokenPresenterImpl<V>
where
    V: TokenView + Send + Sync,
{
    async fn show_tokens(&self, query: Option<&str>, limit: usize) -> Result<()> {
        self.view.display_loading().await?;

        match self.interactor.search_tokens(query.unwrap_or("")).await {
            Ok(tokens) => {
                let shown = tokens.len().min(limit.max(1));
                self.view.display_tokens(&tokens[..shown], tokens.len()).await?;
            }
            Err(e) => {
                self.view.display_error(e.to_string()).await?;
            }
        }

        Ok(())
    }
}
