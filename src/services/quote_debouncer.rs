//! Debounced quote requests.
//!
//! Inputs are pushed on every edit; a quote is only requested once the
//! inputs have been quiet for the configured delay. Each result is sent back
//! together with the input it was computed for, so the receiver can drop
//! results that no longer match its current state.
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::select;
use tokio::sync::{mpsc, watch};
use tokio::time::sleep;

use crate::entity::{QuoteInput, QuoteState};
use crate::interactor::swap_interactor::SwapInteractor;

/// A quote result tagged with the input that produced it
#[derive(Debug, Clone)]
pub struct QuoteUpdate {
    pub input: QuoteInput,
    pub state: QuoteState,
}

pub struct QuoteDebouncer {
    input_tx: watch::Sender<Option<QuoteInput>>,
    stop_tx: Option<mpsc::Sender<()>>,
}

impl QuoteDebouncer {
    /// Start the debounce loop. Results are delivered on `results`.
    pub fn spawn(
        interactor: Arc<dyn SwapInteractor>,
        delay: Duration,
        results: mpsc::Sender<QuoteUpdate>,
    ) -> Self {
        let (input_tx, mut input_rx) = watch::channel::<Option<QuoteInput>>(None);
        let (stop_tx, mut stop_rx) = mpsc::channel::<()>(1);

        tokio::spawn(async move {
            'outer: loop {
                select! {
                    changed = input_rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                    }
                    _ = stop_rx.recv() => break,
                }

                // Restart the quiet period on every further change
                loop {
                    select! {
                        _ = sleep(delay) => break,
                        changed = input_rx.changed() => {
                            if changed.is_err() {
                                break 'outer;
                            }
                        }
                        _ = stop_rx.recv() => break 'outer,
                    }
                }

                let input = match input_rx.borrow_and_update().clone() {
                    Some(input) => input,
                    None => continue,
                };

                if !input.is_quotable() {
                    debug!("Skipping quote for {:?}", input);
                    continue;
                }

                if results
                    .send(QuoteUpdate {
                        input: input.clone(),
                        state: QuoteState::Pending,
                    })
                    .await
                    .is_err()
                {
                    break;
                }

                let state = match interactor.request_quote(&input).await {
                    Ok(Some(quote)) => QuoteState::Ready(quote),
                    Ok(None) => QuoteState::Idle,
                    Err(e) => {
                        warn!("Quote request failed: {}", e);
                        QuoteState::Failed(e.to_string())
                    }
                };

                if results.send(QuoteUpdate { input, state }).await.is_err() {
                    break;
                }
            }

            info!("Quote debouncer stopped");
        });

        Self {
            input_tx,
            stop_tx: Some(stop_tx),
        }
    }

    /// Record the latest inputs, restarting the quiet period
    pub fn update(&self, input: QuoteInput) {
        self.input_tx.send_replace(Some(input));
    }

    pub async fn stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(()).await;
        }
    }
}
