use anyhow::Result;
use clap::Args;
use log::warn;
use std::sync::Arc;
use std::time::Duration;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::entity::DEFAULT_PERP_SYMBOL;
use crate::presenter::perp_presenter::{PerpPresenter, PerpPresenterImpl};
use crate::services::PollingTask;
use crate::utils::normalize_perp_symbol;
use crate::view::perp_view::ConsolePerpView;
use crate::view::Console;

#[derive(Args, Debug, Clone)]
pub struct PerpsArgs {
    /// Keep refreshing until interrupted
    #[arg(long)]
    pub watch: bool,
}

#[derive(Args, Debug, Clone)]
pub struct OrderbookArgs {
    /// Market symbol, e.g. SOL or PERP_SOL_USDC
    #[arg(default_value = DEFAULT_PERP_SYMBOL)]
    pub symbol: String,

    /// Also print market limits (tick sizes, max leverage)
    #[arg(long)]
    pub info: bool,

    /// Keep refreshing until interrupted
    #[arg(long)]
    pub watch: bool,
}

#[derive(Args, Debug, Clone)]
pub struct TicketArgs {
    /// Market symbol, e.g. SOL or PERP_SOL_USDC
    pub symbol: String,

    /// Margin in USDC
    pub margin: f64,

    /// Leverage, clamped to 1..=100
    #[arg(default_value_t = 1)]
    pub leverage: u32,
}

fn presenter(services: &ServiceContainer) -> Arc<PerpPresenterImpl<ConsolePerpView>> {
    let view = Arc::new(ConsolePerpView::new(Console::stdout()));
    Arc::new(PerpPresenterImpl::new(services.perp_interactor(), view))
}

/// Run `job` on `period` until Ctrl-C
async fn watch_until_interrupted<F, Fut>(name: &str, period: Duration, job: F) -> Result<()>
where
    F: FnMut() -> Fut + Send + 'static,
    Fut: std::future::Future<Output = Result<()>> + Send + 'static,
{
    let mut task = PollingTask::new(name, period);
    task.start(job);
    tokio::signal::ctrl_c().await?;
    task.stop().await;
    Ok(())
}

pub struct PerpsCommand;

impl CommandHandler for PerpsCommand {
    type Args = PerpsArgs;

    fn command_name() -> &'static str {
        "perps"
    }

    fn description() -> &'static str {
        "show the top perpetual markets"
    }

    async fn execute(args: PerpsArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let presenter = presenter(&services);

        if !args.watch {
            return presenter.show_markets().await;
        }

        let period = Duration::from_secs(services.config().orderly.markets_refresh_secs);
        watch_until_interrupted("perp markets", period, move || {
            let presenter = presenter.clone();
            async move { presenter.show_markets().await }
        })
        .await
    }
}

pub struct OrderbookCommand;

impl CommandHandler for OrderbookCommand {
    type Args = OrderbookArgs;

    fn command_name() -> &'static str {
        "orderbook"
    }

    fn description() -> &'static str {
        "show a perpetual order book (format: orderbook [symbol])"
    }

    async fn execute(args: OrderbookArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let symbol = normalize_perp_symbol(&args.symbol);
        let presenter = presenter(&services);

        if args.info {
            if let Err(e) = presenter.show_market_info(&symbol).await {
                warn!("Market info unavailable: {}", e);
            }
        }

        if !args.watch {
            return presenter.show_order_book(&symbol).await;
        }

        let period = Duration::from_secs(services.config().orderly.orderbook_refresh_secs);
        watch_until_interrupted("order book", period, move || {
            let presenter = presenter.clone();
            let symbol = symbol.clone();
            async move { presenter.show_order_book(&symbol).await }
        })
        .await
    }
}

pub struct TicketCommand;

impl CommandHandler for TicketCommand {
    type Args = TicketArgs;

    fn command_name() -> &'static str {
        "ticket"
    }

    fn description() -> &'static str {
        "size a perp order (format: ticket symbol margin leverage)"
    }

    async fn execute(args: TicketArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let symbol = normalize_perp_symbol(&args.symbol);
        presenter(&services)
            .show_ticket(&symbol, args.margin, args.leverage)
            .await
    }
}
