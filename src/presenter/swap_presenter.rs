use crate::entity::{QuoteInput, QuoteState, TerminalError};
use crate::interactor::swap_interactor::SwapInteractor;
use crate::solana::WalletAdapter;
use crate::view::swap_view::SwapView;
use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

#[async_trait]
pub trait SwapPresenter: Send + Sync {
    async fn show_quote(&self, input: &QuoteInput) -> Result<()>;

    /// Quote `input`, then sign and submit the swap with `wallet`
    async fn process_swap(&self, input: &QuoteInput, wallet: Option<Arc<dyn WalletAdapter>>) -> Result<()>;
}

pub struct SwapPresenterImpl<V> {
    interactor: Arc<dyn SwapInteractor>,
    view: Arc<V>,
}

impl<V> SwapPresenterImpl<V>
where
    V: SwapView,
{
    pub fn new(interactor: Arc<dyn SwapInteractor>, view: Arc<V>) -> Self {
        Self { interactor, view }
    }
}

#[async_trait]
impl<V> SwapPresenter for SwapPresenterImpl<V>
where
    V: SwapView + Send + Sync,
{
    async fn show_quote(&self, input: &QuoteInput) -> Result<()> {
        if !input.is_quotable() {
            return self.view.display_validation_error(TerminalError::InvalidAmount.to_string()).await;
        }

        let state = match self.interactor.request_quote(input).await {
            Ok(Some(quote)) => QuoteState::Ready(quote),
            Ok(None) => QuoteState::Idle,
            Err(e) => QuoteState::Failed(e.to_string()),
        };

        self.view.display_quote(input, &state).await
    }

    async fn process_swap(&self, input: &QuoteInput, wallet: Option<Arc<dyn WalletAdapter>>) -> Result<()> {
        // Validate before any network call
        let wallet = match wallet {
            Some(wallet) => wallet,
            None => {
                return self
                    .view
                    .display_validation_error(TerminalError::WalletNotConnected.to_string())
                    .await;
            }
        };
        if !input.is_quotable() {
            return self.view.display_validation_error(TerminalError::InvalidAmount.to_string()).await;
        }

        let quote = match self.interactor.request_quote(input).await {
            Ok(Some(quote)) => quote,
            Ok(None) => {
                return self.view.display_validation_error(TerminalError::NoQuote.to_string()).await;
            }
            Err(e) => {
                let state = QuoteState::Failed(e.to_string());
                return self.view.display_quote(input, &state).await;
            }
        };

        self.view
            .display_quote(input, &QuoteState::Ready(quote.clone()))
            .await?;
        self.view.display_processing(&quote).await?;

        match self.interactor.execute_swap(&quote, &*wallet).await {
            Ok(outcome) => self.view.display_swap_success(&outcome).await?,
            Err(e) => self.view.display_swap_error(e.to_string()).await?,
        }

        Ok(())
    }
}
