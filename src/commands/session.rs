use anyhow::Result;
use std::sync::Arc;

use super::CommandHandler;
use crate::di::ServiceContainer;
use crate::router::session::TerminalSession;
use crate::view::session_view::ConsoleSessionView;
use crate::view::Console;

pub struct SessionCommand;

impl CommandHandler for SessionCommand {
    type Args = ();

    fn command_name() -> &'static str {
        "session"
    }

    fn description() -> &'static str {
        "interactive terminal"
    }

    async fn execute(_args: (), services: Arc<ServiceContainer>) -> Result<()> {
        let view = Arc::new(ConsoleSessionView::new(Console::stdout()));
        TerminalSession::new(services, view).run().await
    }
}
