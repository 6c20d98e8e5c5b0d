use anyhow::Result;
use clap::Args;
use std::sync::Arc;

use super::{CommandHandler, OrderArgs};
use crate::di::ServiceContainer;
use crate::entity::{QuoteInput, QuoteToken, SlippageTolerance};
use crate::presenter::swap_presenter::{SwapPresenter, SwapPresenterImpl};
use crate::view::swap_view::ConsoleSwapView;
use crate::view::Console;

#[derive(Args, Debug, Clone)]
pub struct SwapArgs {
    #[command(flatten)]
    pub order: OrderArgs,

    /// Send the swap without asking for confirmation
    #[arg(long)]
    pub yes: bool,
}

/// Resolve the token against the catalog and build the quote input
async fn build_input(order: &OrderArgs, services: &ServiceContainer) -> Result<QuoteInput> {
    let token = services.catalog_interactor().find_token(&order.token).await?;

    let slippage = match order.slippage {
        Some(percent) => SlippageTolerance::from_user_percent(percent),
        None => SlippageTolerance::from_bps(services.config().trading.slippage_bps),
    };

    Ok(QuoteInput::new(
        order.side,
        order.amount,
        Some(QuoteToken::from(&token)),
        slippage,
    ))
}

pub struct QuoteCommand;

impl CommandHandler for QuoteCommand {
    type Args = OrderArgs;

    fn command_name() -> &'static str {
        "quote"
    }

    fn description() -> &'static str {
        "quote a swap (format: quote buy|sell amount token)"
    }

    async fn execute(args: OrderArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let input = build_input(&args, &services).await?;
        let view = Arc::new(ConsoleSwapView::new(Console::stdout()));
        let presenter = SwapPresenterImpl::new(services.swap_interactor(), view);
        presenter.show_quote(&input).await
    }
}

pub struct SwapCommand;

impl CommandHandler for SwapCommand {
    type Args = SwapArgs;

    fn command_name() -> &'static str {
        "swap"
    }

    fn description() -> &'static str {
        "swap via Jupiter (format: swap buy|sell amount token --yes)"
    }

    async fn execute(args: SwapArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let input = build_input(&args.order, &services).await?;
        let console = Console::stdout();
        let view = Arc::new(ConsoleSwapView::new(console.clone()));
        let presenter = SwapPresenterImpl::new(services.swap_interactor(), view);

        if !args.yes {
            presenter.show_quote(&input).await?;
            return console.print("Re-run with --yes to sign and send this swap.");
        }

        presenter.process_swap(&input, services.wallet()).await
    }
}
