use anyhow::Result;
use log::debug;
use std::sync::Arc;

use crate::commands::balance::BalanceCommand;
use crate::commands::perps::{OrderbookCommand, PerpsCommand, TicketCommand};
use crate::commands::session::SessionCommand;
use crate::commands::swap::{QuoteCommand, SwapCommand};
use crate::commands::tokens::{TokensCommand, WatchCommand};
use crate::commands::{CommandHandler, Commands};
use crate::di::ServiceContainer;

pub mod session;

// Routes parsed CLI commands to their handlers
pub struct CommandRouter {
    services: Arc<ServiceContainer>,
}

impl CommandRouter {
    pub fn new(services: Arc<ServiceContainer>) -> Self {
        Self { services }
    }

    pub async fn dispatch(&self, command: Commands) -> Result<()> {
        let services = self.services.clone();

        match command {
            Commands::Tokens(args) => run::<TokensCommand>(args, services).await,
            Commands::Watch(args) => run::<WatchCommand>(args, services).await,
            Commands::Quote(args) => run::<QuoteCommand>(args, services).await,
            Commands::Swap(args) => run::<SwapCommand>(args, services).await,
            Commands::Perps(args) => run::<PerpsCommand>(args, services).await,
            Commands::Orderbook(args) => run::<OrderbookCommand>(args, services).await,
            Commands::Ticket(args) => run::<TicketCommand>(args, services).await,
            Commands::Balance(args) => run::<BalanceCommand>(args, services).await,
            Commands::Session => run::<SessionCommand>((), services).await,
        }
    }
}

async fn run<C: CommandHandler>(args: C::Args, services: Arc<ServiceContainer>) -> Result<()> {
    debug!("Running '{}' command: {}", C::command_name(), C::description());
    C::execute(args, services).await
}
