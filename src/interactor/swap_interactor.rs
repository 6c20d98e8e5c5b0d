use crate::entity::{Quote, QuoteInput, SwapOutcome, TerminalError, TradeSide};
use crate::solana::jupiter::models::{QuoteAmounts, QuoteParams};
use crate::solana::jupiter::{QuoteService, SwapService};
use crate::solana::{from_base_units, to_base_units, TransactionBroadcaster, WalletAdapter, SOL_DECIMALS};
use anyhow::{anyhow, Result};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use log::{debug, info};
use solana_sdk::transaction::VersionedTransaction;
use std::sync::Arc;

#[async_trait]
pub trait SwapInteractor: Send + Sync {
    /// Price the current order. Returns `Ok(None)` without calling the
    /// aggregator when there is nothing to quote (amount of zero or less).
    async fn request_quote(&self, input: &QuoteInput) -> Result<Option<Quote>>;

    /// Build the swap for `quote`, have `wallet` sign it and submit it.
    async fn execute_swap(&self, quote: &Quote, wallet: &dyn WalletAdapter) -> Result<SwapOutcome>;
}

pub struct SwapInteractorImpl {
    quote_service: Arc<dyn QuoteService>,
    swap_service: Arc<dyn SwapService>,
    broadcaster: Arc<dyn TransactionBroadcaster>,
    native_mint: String,
    skip_preflight: bool,
}

impl SwapInteractorImpl {
    pub fn new(
        quote_service: Arc<dyn QuoteService>,
        swap_service: Arc<dyn SwapService>,
        broadcaster: Arc<dyn TransactionBroadcaster>,
        native_mint: impl Into<String>,
        skip_preflight: bool,
    ) -> Self {
        Self {
            quote_service,
            swap_service,
            broadcaster,
            native_mint: native_mint.into(),
            skip_preflight,
        }
    }
}

/// Decode the base64 wire transaction returned by the swap build call
pub fn decode_transaction(encoded: &str) -> Result<VersionedTransaction> {
    let bytes = STANDARD
        .decode(encoded.trim())
        .map_err(|e| TerminalError::Decode(format!("swap transaction base64: {}", e)))?;

    bincode::deserialize::<VersionedTransaction>(&bytes)
        .map_err(|e| TerminalError::Decode(format!("swap transaction: {}", e)).into())
}

#[async_trait]
impl SwapInteractor for SwapInteractorImpl {
    async fn request_quote(&self, input: &QuoteInput) -> Result<Option<Quote>> {
        if !input.amount.is_finite() || input.amount <= 0.0 {
            return Ok(None);
        }

        let token = input.token.as_ref().ok_or(TerminalError::NoTokenSelected)?;

        // Buying spends SOL for the token; selling spends the token for SOL
        let (input_mint, input_decimals, output_mint, output_decimals) = match input.side {
            TradeSide::Buy => (self.native_mint.clone(), SOL_DECIMALS, token.address.clone(), token.decimals),
            TradeSide::Sell => (token.address.clone(), token.decimals, self.native_mint.clone(), SOL_DECIMALS),
        };

        let amount = to_base_units(input.amount, input_decimals)?;
        if amount == 0 {
            return Err(TerminalError::InvalidAmount.into());
        }

        let params = QuoteParams {
            input_mint: input_mint.clone(),
            output_mint: output_mint.clone(),
            amount,
            slippage_bps: input.slippage.bps(),
        };

        let response = self.quote_service.get_quote(&params).await?;

        let amounts: QuoteAmounts = serde_json::from_value(response.clone())
            .map_err(|e| TerminalError::Decode(format!("quote amounts: {}", e)))?;
        let in_amount = amounts
            .in_amount
            .parse::<u64>()
            .map_err(|e| TerminalError::Decode(format!("inAmount {}: {}", amounts.in_amount, e)))?;
        let out_amount = amounts
            .out_amount
            .parse::<u64>()
            .map_err(|e| TerminalError::Decode(format!("outAmount {}: {}", amounts.out_amount, e)))?;

        let ui_out_amount = from_base_units(out_amount, output_decimals);
        debug!(
            "{} {} {}: {} -> {}",
            input.side, input.amount, token.symbol, in_amount, ui_out_amount
        );

        Ok(Some(Quote {
            input: input.clone(),
            input_mint,
            output_mint,
            in_amount,
            out_amount,
            ui_out_amount,
            slippage_bps: params.slippage_bps,
            response,
        }))
    }

    async fn execute_swap(&self, quote: &Quote, wallet: &dyn WalletAdapter) -> Result<SwapOutcome> {
        let user_public_key = wallet.public_key().to_string();

        let swap_response = self
            .swap_service
            .build_swap_transaction(&quote.response, &user_public_key)
            .await?;

        let transaction = decode_transaction(&swap_response.swap_transaction)?;
        let signed = wallet.sign_transaction(transaction).await?;

        if signed.signatures.is_empty() {
            return Err(anyhow!(TerminalError::Signing("transaction has no signatures".to_string())));
        }

        let signature = self.broadcaster.broadcast(&signed, self.skip_preflight).await?;

        info!(
            "Swap submitted: {} {} -> {} ({})",
            quote.in_amount, quote.input_mint, quote.output_mint, signature
        );

        Ok(SwapOutcome {
            signature,
            input_mint: quote.input_mint.clone(),
            output_mint: quote.output_mint.clone(),
            amount_in: quote.input.amount,
            amount_out: quote.ui_out_amount,
        })
    }
}
