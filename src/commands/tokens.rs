use anyhow::Result;
use clap::Args;
use log::warn;
use std::sync::Arc;
use std::time::Duration;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::presenter::token_presenter::{TokenPresenter, TokenPresenterImpl};
use crate::services::PollingTask;
use crate::view::token_view::{ConsoleTokenView, TokenView};
use crate::view::Console;

#[derive(Args, Debug, Clone)]
pub struct TokensArgs {
    /// Filter by symbol or name
    pub query: Option<String>,

    /// Maximum rows to print
    #[arg(long, default_value_t = 25)]
    pub limit: usize,
}

#[derive(Args, Debug, Clone)]
pub struct WatchArgs {
    /// Refresh period in seconds (defaults to catalog.refresh_secs)
    #[arg(long)]
    pub interval: Option<u64>,

    /// Maximum rows to print
    #[arg(long, default_value_t = 25)]
    pub limit: usize,
}

pub struct TokensCommand;

impl CommandHandler for TokensCommand {
    type Args = TokensArgs;

    fn command_name() -> &'static str {
        "tokens"
    }

    fn description() -> &'static str {
        "list the token catalog (format: tokens [query])"
    }

    async fn execute(args: TokensArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let view = Arc::new(ConsoleTokenView::new(Console::stdout()));
        let presenter = TokenPresenterImpl::new(services.catalog_interactor(), view);
        presenter.show_tokens(args.query.as_deref(), args.limit).await
    }
}

pub struct WatchCommand;

impl CommandHandler for WatchCommand {
    type Args = WatchArgs;

    fn command_name() -> &'static str {
        "watch"
    }

    fn description() -> &'static str {
        "reprint the catalog on every refresh"
    }

    async fn execute(args: WatchArgs, services: Arc<ServiceContainer>) -> Result<()> {
        let period = Duration::from_secs(
            args.interval
                .unwrap_or(services.config().catalog.refresh_secs)
                .max(1),
        );
        let interactor = services.catalog_interactor();
        let view = Arc::new(ConsoleTokenView::new(Console::stdout()));
        let limit = args.limit.max(1);

        let mut task = PollingTask::new("catalog", period);
        task.start(move || {
            let interactor = interactor.clone();
            let view = view.clone();
            async move {
                match interactor.load_catalog().await {
                    Ok(catalog) => {
                        let shown = catalog.len().min(limit);
                        view.display_tokens(&catalog.tokens[..shown], catalog.len()).await
                    }
                    Err(e) => {
                        warn!("Catalog refresh failed: {}", e);
                        view.display_error(e.to_string()).await
                    }
                }
            }
        });

        tokio::signal::ctrl_c().await?;
        task.stop().await;
        Ok(())
    }
}
