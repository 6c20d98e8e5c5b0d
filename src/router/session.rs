//! Interactive terminal session.
//!
//! The session owns the [`TerminalState`] and is its only writer. Background
//! pollers and the quote debouncer hand their results over channels; the
//! session applies them in its select loop alongside user commands.
use std::sync::Arc;
use std::time::Duration;

use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::select;
use tokio::sync::{mpsc, watch};

use crate::config::AppConfig;
use crate::di::ServiceContainer;
use crate::entity::{
    OrderBook, PerpMarket, QuoteState, SlippageTolerance, TerminalError, TerminalState, TokenCatalog,
    TradeSide, ViewMode, WalletBalances,
};
use crate::interactor::balance_interactor::BalanceInteractor;
use crate::interactor::catalog_interactor::CatalogInteractor;
use crate::interactor::perp_interactor::{build_order_ticket, PerpInteractor};
use crate::interactor::swap_interactor::SwapInteractor;
use crate::services::{PollingTask, QuoteDebouncer, QuoteUpdate};
use crate::solana::WalletAdapter;
use crate::utils::{normalize_perp_symbol, parse_amount_input, parse_percent, AmountInput};
use crate::view::balance_view::render_balances;
use crate::view::format::format_compact_usd;
use crate::view::perp_view::{render_market_info, render_order_book};
use crate::view::session_view::SessionView;
use crate::view::swap_view::{render_quote, render_swap_success};
use crate::view::token_view::render_token_table;

pub const SESSION_COMMANDS: &[(&str, &str)] = &[
    ("help", "show this list"),
    ("<enter>", "redraw the screen"),
    ("spot | perps", "switch view"),
    ("tokens [query]", "list catalog tokens"),
    ("select <symbol|mint>", "choose the token to trade"),
    ("buy [amount] | sell [amount]", "set side (and amount)"),
    ("<amount> | <pct>%", "set amount, or a share of the paying balance"),
    ("slippage <pct>", "slippage tolerance, minimum 1%"),
    ("quote", "refresh the quote"),
    ("swap", "sign and send the quoted swap"),
    ("balance", "refresh wallet balances"),
    ("market <symbol>", "choose the perp market"),
    ("book [symbol]", "show a perp order book"),
    ("info [symbol]", "show perp market limits"),
    ("ticket <margin> [leverage]", "size an order on the selected perp"),
    ("quit", "leave the session"),
];

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Help,
    Redraw,
    Quit,
    View(ViewMode),
    Tokens(Option<String>),
    Select(String),
    Side(TradeSide, Option<AmountInput>),
    Amount(AmountInput),
    Slippage(f64),
    Quote,
    Swap,
    Balance,
    Market(String),
    Book(Option<String>),
    Info(Option<String>),
    Ticket { margin: f64, leverage: u32 },
}

pub fn parse_command(line: &str) -> Result<SessionAction> {
    let mut words = line.split_whitespace();
    let head = match words.next() {
        Some(head) => head.to_lowercase(),
        None => return Ok(SessionAction::Redraw),
    };
    let rest: Vec<&str> = words.collect();
    let arg = rest.first().copied();
    let joined = (!rest.is_empty()).then(|| rest.join(" "));

    let amount = |input: &str| {
        parse_amount_input(input).ok_or_else(|| anyhow!("Invalid amount: {}", input))
    };

    let command = match head.as_str() {
        "help" | "?" => SessionAction::Help,
        "quit" | "exit" | "q" => SessionAction::Quit,
        "spot" => SessionAction::View(ViewMode::Spot),
        "perps" | "perp" => SessionAction::View(ViewMode::Perps),
        "tokens" | "list" => SessionAction::Tokens(joined),
        "select" | "token" => {
            SessionAction::Select(arg.ok_or_else(|| anyhow!("Usage: select <symbol|mint>"))?.to_string())
        }
        "buy" | "sell" | "b" | "s" => {
            let side: TradeSide = head.parse()?;
            SessionAction::Side(side, arg.map(amount).transpose()?)
        }
        "amount" => SessionAction::Amount(amount(arg.ok_or_else(|| anyhow!("Usage: amount <value>"))?)?),
        "slippage" => {
            SessionAction::Slippage(parse_percent(arg.ok_or_else(|| anyhow!("Usage: slippage <pct>"))?)?)
        }
        "quote" => SessionAction::Quote,
        "swap" | "confirm" => SessionAction::Swap,
        "balance" | "bal" => SessionAction::Balance,
        "market" => SessionAction::Market(normalize_perp_symbol(
            arg.ok_or_else(|| anyhow!("Usage: market <symbol>"))?,
        )),
        "book" => SessionAction::Book(arg.map(normalize_perp_symbol)),
        "info" => SessionAction::Info(arg.map(normalize_perp_symbol)),
        "ticket" => {
            let margin = arg
                .and_then(|m| m.parse::<f64>().ok())
                .ok_or_else(|| anyhow!("Usage: ticket <margin> [leverage]"))?;
            let leverage = match rest.get(1) {
                Some(l) => l
                    .trim_end_matches(['x', 'X'])
                    .parse::<u32>()
                    .map_err(|_| anyhow!("Invalid leverage: {}", l))?,
                None => 1,
            };
            SessionAction::Ticket { margin, leverage }
        }
        _ => match parse_amount_input(line) {
            Some(input) => SessionAction::Amount(input),
            None => return Err(anyhow!("Unknown command: {} (type 'help')", head)),
        },
    };

    Ok(command)
}

/// Polling periods and defaults the session runs with
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub catalog_refresh: Duration,
    pub markets_refresh: Duration,
    pub orderbook_refresh: Duration,
    pub quote_debounce: Duration,
    pub slippage: SlippageTolerance,
}

impl From<&AppConfig> for SessionSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            catalog_refresh: Duration::from_secs(config.catalog.refresh_secs),
            markets_refresh: Duration::from_secs(config.orderly.markets_refresh_secs),
            orderbook_refresh: Duration::from_secs(config.orderly.orderbook_refresh_secs),
            quote_debounce: Duration::from_millis(config.trading.quote_debounce_ms),
            slippage: SlippageTolerance::from_bps(config.trading.slippage_bps),
        }
    }
}

/// Interactors and wallet the session talks to
#[derive(Clone)]
pub struct SessionDeps {
    pub catalog: Arc<dyn CatalogInteractor>,
    pub swap: Arc<dyn SwapInteractor>,
    pub perps: Arc<dyn PerpInteractor>,
    pub balances: Arc<dyn BalanceInteractor>,
    pub wallet: Option<Arc<dyn WalletAdapter>>,
}

pub struct TerminalSession<V> {
    deps: SessionDeps,
    settings: SessionSettings,
    view: Arc<V>,
    state: TerminalState,
    debouncer: Option<QuoteDebouncer>,
    balance_tx: Option<mpsc::Sender<WalletBalances>>,
    symbol_tx: Option<watch::Sender<String>>,
}

impl<V> TerminalSession<V>
where
    V: SessionView + 'static,
{
    pub fn new(services: Arc<ServiceContainer>, view: Arc<V>) -> Self {
        let deps = SessionDeps {
            catalog: services.catalog_interactor(),
            swap: services.swap_interactor(),
            perps: services.perp_interactor(),
            balances: services.balance_interactor(),
            wallet: services.wallet(),
        };
        Self::with_deps(deps, SessionSettings::from(services.config()), view)
    }

    pub fn with_deps(deps: SessionDeps, settings: SessionSettings, view: Arc<V>) -> Self {
        let state = TerminalState {
            slippage: settings.slippage,
            ..TerminalState::default()
        };
        Self {
            deps,
            settings,
            view,
            state,
            debouncer: None,
            balance_tx: None,
            symbol_tx: None,
        }
    }

    pub fn state(&self) -> &TerminalState {
        &self.state
    }

    /// Run until `quit` or end of input
    pub async fn run(mut self) -> Result<()> {
        let (catalog_tx, mut catalog_rx) = mpsc::channel::<TokenCatalog>(4);
        let (markets_tx, mut markets_rx) = mpsc::channel::<Vec<PerpMarket>>(4);
        let (book_tx, mut book_rx) = mpsc::channel::<OrderBook>(4);
        let (quote_tx, mut quote_rx) = mpsc::channel::<QuoteUpdate>(16);
        let (balance_tx, mut balance_rx) = mpsc::channel::<WalletBalances>(4);
        let (symbol_tx, symbol_rx) = watch::channel(self.state.selected_perp.clone());

        let mut catalog_task = PollingTask::new("catalog", self.settings.catalog_refresh);
        let catalog = self.deps.catalog.clone();
        catalog_task.start(move || {
            let catalog = catalog.clone();
            let tx = catalog_tx.clone();
            async move {
                let loaded = catalog.load_catalog().await?;
                tx.send(loaded).await.map_err(|_| anyhow!("session closed"))
            }
        });

        let mut markets_task = PollingTask::new("perp markets", self.settings.markets_refresh);
        let perps = self.deps.perps.clone();
        markets_task.start(move || {
            let perps = perps.clone();
            let tx = markets_tx.clone();
            async move {
                let markets = perps.load_markets().await?;
                tx.send(markets).await.map_err(|_| anyhow!("session closed"))
            }
        });

        let mut book_task = PollingTask::new("order book", self.settings.orderbook_refresh);
        let perps = self.deps.perps.clone();
        book_task.start(move || {
            let perps = perps.clone();
            let tx = book_tx.clone();
            let symbol = symbol_rx.borrow().clone();
            async move {
                let book = perps.get_order_book(&symbol).await?;
                tx.send(book).await.map_err(|_| anyhow!("session closed"))
            }
        });

        self.debouncer = Some(QuoteDebouncer::spawn(
            self.deps.swap.clone(),
            self.settings.quote_debounce,
            quote_tx,
        ));
        self.balance_tx = Some(balance_tx);
        self.symbol_tx = Some(symbol_tx);

        self.view
            .display_message("Loading markets... type 'help' for commands")
            .await?;
        self.refresh_balances();

        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        loop {
            select! {
                line = lines.next_line() => {
                    let line = match line? {
                        Some(line) => line,
                        None => break,
                    };
                    match parse_command(&line) {
                        Ok(SessionAction::Quit) => break,
                        Ok(command) => {
                            if let Err(e) = self.handle_command(command).await {
                                self.view.display_error(e.to_string()).await?;
                            }
                        }
                        Err(e) => self.view.display_error(e.to_string()).await?,
                    }
                }
                Some(catalog) = catalog_rx.recv() => self.on_catalog(catalog).await?,
                Some(markets) = markets_rx.recv() => self.on_perp_markets(markets),
                Some(book) = book_rx.recv() => {
                    self.state.apply_order_book(book);
                }
                Some(update) = quote_rx.recv() => self.on_quote(update).await?,
                Some(balances) = balance_rx.recv() => self.on_balances(balances),
            }
        }

        info!("Closing session");
        catalog_task.stop().await;
        markets_task.stop().await;
        book_task.stop().await;
        if let Some(mut debouncer) = self.debouncer.take() {
            debouncer.stop().await;
        }
        Ok(())
    }

    pub async fn handle_command(&mut self, command: SessionAction) -> Result<()> {
        match command {
            SessionAction::Help => self.view.display_help(SESSION_COMMANDS).await,
            SessionAction::Redraw | SessionAction::Quit => self.view.display_state(&self.state).await,
            SessionAction::View(mode) => {
                self.state.view_mode = mode;
                self.view.display_state(&self.state).await
            }
            SessionAction::Tokens(query) => {
                let matches: Vec<_> = self
                    .state
                    .catalog
                    .search(query.as_deref().unwrap_or(""))
                    .into_iter()
                    .cloned()
                    .collect();
                if matches.is_empty() {
                    return self.view.display_message("No tokens match.").await;
                }
                let selected = self.state.selected_token.as_ref().map(|t| t.address.as_str());
                self.view
                    .display_message(render_token_table(&matches, selected).trim_end())
                    .await
            }
            SessionAction::Select(key) => {
                if !self.state.select_token(&key) {
                    return Err(anyhow!("Token {} is not in the catalog", key));
                }
                self.state.balances = None;
                self.request_quote();
                self.refresh_balances();
                self.view.display_state(&self.state).await
            }
            SessionAction::Side(side, amount) => {
                let mut changed = self.state.set_side(side);
                if let Some(amount) = amount {
                    changed |= self.apply_amount(amount)?;
                }
                if changed {
                    self.request_quote();
                }
                self.show_order().await
            }
            SessionAction::Amount(amount) => {
                if self.apply_amount(amount)? {
                    self.request_quote();
                }
                self.show_order().await
            }
            SessionAction::Slippage(percent) => {
                if self.state.set_slippage(SlippageTolerance::from_user_percent(percent)) {
                    self.request_quote();
                }
                self.view
                    .display_message(&format!("Slippage {:.2}%", self.state.slippage.percent()))
                    .await
            }
            SessionAction::Quote => {
                if !self.state.quote_input().is_quotable() {
                    return Err(TerminalError::InvalidAmount.into());
                }
                self.request_quote();
                Ok(())
            }
            SessionAction::Swap => self.execute_swap().await,
            SessionAction::Balance => {
                let wallet = self.deps.wallet.clone().ok_or(TerminalError::WalletNotConnected)?;
                let owner = wallet.public_key().to_string();
                let mint = self.state.selected_token.as_ref().map(|t| t.address.clone());
                let balances = self.deps.balances.get_balances(&owner, mint.as_deref()).await?;
                self.on_balances(balances);
                self.show_balances().await
            }
            SessionAction::Market(symbol) => {
                if !self.state.select_perp(&symbol) {
                    return Err(anyhow!("Market {} is not listed", symbol));
                }
                self.publish_perp_symbol();
                self.view.display_state(&self.state).await
            }
            SessionAction::Book(symbol) => {
                let symbol = symbol.unwrap_or_else(|| self.state.selected_perp.clone());
                let book = self.deps.perps.get_order_book(&symbol).await?;
                self.view
                    .display_message(render_order_book(&book).trim_end())
                    .await?;
                self.state.apply_order_book(book);
                Ok(())
            }
            SessionAction::Info(symbol) => {
                let symbol = symbol.unwrap_or_else(|| self.state.selected_perp.clone());
                let info = self.deps.perps.get_market_info(&symbol).await?;
                self.view.display_message(&render_market_info(&info)).await
            }
            SessionAction::Ticket { margin, leverage } => {
                let market = self
                    .state
                    .selected_perp_market()
                    .ok_or_else(|| anyhow!("No market data for {} yet", self.state.selected_perp))?;
                let ticket = build_order_ticket(margin, leverage, market.mark_price)?;
                self.view
                    .display_message(&format!(
                        "{} x{}: size {:.4} {} at {:.4}, notional {}",
                        market.symbol,
                        ticket.leverage,
                        ticket.quantity,
                        market.base_symbol(),
                        ticket.price,
                        format_compact_usd(ticket.notional)
                    ))
                    .await
            }
        }
    }

    fn apply_amount(&mut self, amount: AmountInput) -> Result<bool> {
        match amount {
            AmountInput::Absolute(value) => Ok(self.state.set_amount(value)),
            AmountInput::Percent(percent) => {
                if self.state.balances.is_none() {
                    return Err(anyhow!("Balances not loaded yet, run 'balance' first"));
                }
                Ok(self.state.set_amount_percent(percent))
            }
        }
    }

    async fn execute_swap(&mut self) -> Result<()> {
        let wallet = self.deps.wallet.clone().ok_or(TerminalError::WalletNotConnected)?;
        let quote = self.state.quote.quote().cloned().ok_or(TerminalError::NoQuote)?;

        self.view.display_message("Signing and sending swap...").await?;

        match self.deps.swap.execute_swap(&quote, &*wallet).await {
            Ok(outcome) => {
                self.state.clear_after_swap(outcome.signature.clone());
                self.view.display_message(&render_swap_success(&outcome)).await?;
                self.refresh_balances();
            }
            Err(e) => {
                // Inputs stay as they were so the user can retry
                self.view.display_error(format!("Swap failed: {}", e)).await?;
            }
        }
        Ok(())
    }

    async fn on_catalog(&mut self, catalog: TokenCatalog) -> Result<()> {
        let first_load = self.state.catalog.is_empty();
        let previous = self.state.selected_token.as_ref().map(|t| t.address.clone());

        if self.state.apply_catalog(catalog) {
            self.request_quote();
        }

        let current = self.state.selected_token.as_ref().map(|t| t.address.clone());
        if previous != current {
            self.state.balances = None;
            self.refresh_balances();
        }

        debug!("Catalog applied: {} tokens", self.state.catalog.len());
        if first_load || previous != current {
            self.view.display_state(&self.state).await?;
        }
        Ok(())
    }

    fn on_perp_markets(&mut self, markets: Vec<PerpMarket>) {
        if self.state.apply_perp_markets(markets) {
            self.publish_perp_symbol();
        }
    }

    async fn on_quote(&mut self, update: QuoteUpdate) -> Result<()> {
        let input = update.input.clone();
        let show = !matches!(update.state, QuoteState::Pending);

        if !self.state.apply_quote(&input, update.state) {
            debug!("Discarding stale quote for {:?}", input);
            return Ok(());
        }
        if show {
            self.view
                .display_message(&render_quote(&input, &self.state.quote))
                .await?;
        }
        Ok(())
    }

    fn on_balances(&mut self, balances: WalletBalances) {
        let selected = self.state.selected_token.as_ref().map(|t| t.address.as_str());
        if balances.token_mint.is_some() && balances.token_mint.as_deref() != selected {
            debug!("Dropping balances for a previously selected token");
            return;
        }
        self.state.balances = Some(balances);
    }

    async fn show_order(&self) -> Result<()> {
        let token = self
            .state
            .selected_token
            .as_ref()
            .map(|t| t.symbol.as_str())
            .unwrap_or("-");
        self.view
            .display_message(&format!("{} {} ({})", self.state.side, self.state.amount, token))
            .await
    }

    async fn show_balances(&self) -> Result<()> {
        match &self.state.balances {
            Some(balances) => {
                let symbol = self.state.selected_token.as_ref().map(|t| t.symbol.as_str());
                self.view.display_message(&render_balances(balances, symbol)).await
            }
            None => self.view.display_message("No balances loaded").await,
        }
    }

    fn request_quote(&self) {
        if let Some(debouncer) = &self.debouncer {
            debouncer.update(self.state.quote_input());
        }
    }

    fn publish_perp_symbol(&self) {
        if let Some(tx) = &self.symbol_tx {
            tx.send_replace(self.state.selected_perp.clone());
        }
    }

    /// Fetch balances in the background; the result arrives on the balance channel
    fn refresh_balances(&self) {
        let (wallet, tx) = match (&self.deps.wallet, &self.balance_tx) {
            (Some(wallet), Some(tx)) => (wallet.clone(), tx.clone()),
            _ => return,
        };
        let balances = self.deps.balances.clone();
        let mint = self.state.selected_token.as_ref().map(|t| t.address.clone());

        tokio::spawn(async move {
            let owner = wallet.public_key().to_string();
            match balances.get_balances(&owner, mint.as_deref()).await {
                Ok(result) => {
                    let _ = tx.send(result).await;
                }
                Err(e) => warn!("Balance refresh failed: {}", e),
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{
        OrderBookLevel, PerpMarketInfo, Quote, QuoteInput, SwapOutcome, Token, DEFAULT_TOKEN_DECIMALS,
    };
    use crate::solana::KeypairWallet;
    use async_trait::async_trait;
    use solana_sdk::signature::Keypair;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingView {
        lines: Mutex<Vec<String>>,
    }

    impl RecordingView {
        fn text(&self) -> String {
            self.lines.lock().unwrap().join("\n")
        }
    }

    #[async_trait]
    impl SessionView for RecordingView {
        async fn display_state(&self, state: &TerminalState) -> Result<()> {
            self.lines.lock().unwrap().push(format!("state {:?}", state.view_mode));
            Ok(())
        }

        async fn display_help(&self, commands: &[(&'static str, &'static str)]) -> Result<()> {
            self.lines.lock().unwrap().push(format!("help {}", commands.len()));
            Ok(())
        }

        async fn display_message(&self, text: &str) -> Result<()> {
            self.lines.lock().unwrap().push(text.to_string());
            Ok(())
        }

        async fn display_error(&self, error_message: String) -> Result<()> {
            self.lines.lock().unwrap().push(format!("Error: {}", error_message));
            Ok(())
        }
    }

    struct FakeCatalog;

    #[async_trait]
    impl CatalogInteractor for FakeCatalog {
        async fn load_catalog(&self) -> Result<TokenCatalog> {
            Ok(TokenCatalog::new(vec![token("mint-a", "AAA")]))
        }

        async fn search_tokens(&self, _query: &str) -> Result<Vec<Token>> {
            Ok(Vec::new())
        }

        async fn find_token(&self, _key: &str) -> Result<Token> {
            Err(anyhow!("unused"))
        }
    }

    struct FakeSwap {
        fail: bool,
    }

    #[async_trait]
    impl SwapInteractor for FakeSwap {
        async fn request_quote(&self, _input: &QuoteInput) -> Result<Option<Quote>> {
            Ok(None)
        }

        async fn execute_swap(&self, quote: &Quote, _wallet: &dyn WalletAdapter) -> Result<SwapOutcome> {
            if self.fail {
                return Err(anyhow!("Blockhash not found"));
            }
            Ok(SwapOutcome {
                signature: "5igSig".to_string(),
                input_mint: quote.input_mint.clone(),
                output_mint: quote.output_mint.clone(),
                amount_in: quote.input.amount,
                amount_out: quote.ui_out_amount,
            })
        }
    }

    struct FakePerps;

    #[async_trait]
    impl PerpInteractor for FakePerps {
        async fn load_markets(&self) -> Result<Vec<PerpMarket>> {
            Ok(Vec::new())
        }

        async fn get_market_info(&self, symbol: &str) -> Result<PerpMarketInfo> {
            Ok(PerpMarketInfo {
                symbol: symbol.to_string(),
                base_min: Some(0.01),
                base_max: None,
                base_tick: None,
                quote_tick: None,
                max_leverage: Some(20.0),
            })
        }

        async fn get_order_book(&self, symbol: &str) -> Result<OrderBook> {
            Ok(OrderBook {
                symbol: symbol.to_string(),
                asks: vec![OrderBookLevel { price: 101.0, quantity: 2.0 }],
                bids: vec![OrderBookLevel { price: 99.0, quantity: 3.0 }],
            })
        }
    }

    struct FakeBalances;

    #[async_trait]
    impl BalanceInteractor for FakeBalances {
        async fn get_balances(&self, owner: &str, token_mint: Option<&str>) -> Result<WalletBalances> {
            Ok(WalletBalances {
                owner: owner.to_string(),
                sol: 4.0,
                token_mint: token_mint.map(str::to_string),
                token: 1000.0,
            })
        }
    }

    fn token(address: &str, symbol: &str) -> Token {
        Token {
            address: address.to_string(),
            name: symbol.to_string(),
            symbol: symbol.to_string(),
            price: 2.0,
            price_change_24h: 0.0,
            volume_24h: 500_000.0,
            liquidity: 0.0,
            market_cap: None,
            decimals: DEFAULT_TOKEN_DECIMALS,
            logo_uri: None,
            dex_id: None,
            pair_url: None,
        }
    }

    fn market(symbol: &str, mark_price: f64) -> PerpMarket {
        PerpMarket {
            symbol: symbol.to_string(),
            mark_price,
            index_price: mark_price,
            change_24h: 0.0,
            volume_24h: 0.0,
            open_interest: 0.0,
            funding_rate: None,
        }
    }

    fn settings() -> SessionSettings {
        SessionSettings {
            catalog_refresh: Duration::from_secs(60),
            markets_refresh: Duration::from_secs(30),
            orderbook_refresh: Duration::from_secs(5),
            quote_debounce: Duration::from_millis(500),
            slippage: SlippageTolerance::default(),
        }
    }

    fn build(with_wallet: bool, swap_fails: bool) -> (TerminalSession<RecordingView>, Arc<RecordingView>) {
        let wallet: Option<Arc<dyn WalletAdapter>> = if with_wallet {
            Some(Arc::new(KeypairWallet::new(Keypair::new())))
        } else {
            None
        };
        let deps = SessionDeps {
            catalog: Arc::new(FakeCatalog),
            swap: Arc::new(FakeSwap { fail: swap_fails }),
            perps: Arc::new(FakePerps),
            balances: Arc::new(FakeBalances),
            wallet,
        };
        let view = Arc::new(RecordingView::default());
        let mut session = TerminalSession::with_deps(deps, settings(), view.clone());
        session.state.apply_catalog(TokenCatalog::new(vec![token("mint-a", "AAA"), token("mint-b", "BBB")]));
        (session, view)
    }

    fn ready(session: &mut TerminalSession<RecordingView>) {
        let input = session.state.quote_input();
        let quote = Quote {
            input: input.clone(),
            input_mint: "So11111111111111111111111111111111111111112".to_string(),
            output_mint: "mint-a".to_string(),
            in_amount: 1_000_000_000,
            out_amount: 50_000_000_000,
            ui_out_amount: 50.0,
            slippage_bps: 50,
            response: serde_json::json!({}),
        };
        assert!(session.state.apply_quote(&input, QuoteState::Ready(quote)));
    }

    #[test]
    fn parses_trading_commands() {
        assert_eq!(parse_command("").unwrap(), SessionAction::Redraw);
        assert_eq!(parse_command("  QUIT ").unwrap(), SessionAction::Quit);
        assert_eq!(
            parse_command("buy 0.5").unwrap(),
            SessionAction::Side(TradeSide::Buy, Some(AmountInput::Absolute(0.5)))
        );
        assert_eq!(parse_command("sell").unwrap(), SessionAction::Side(TradeSide::Sell, None));
        assert_eq!(parse_command("25%").unwrap(), SessionAction::Amount(AmountInput::Percent(25.0)));
        assert_eq!(parse_command("1.5").unwrap(), SessionAction::Amount(AmountInput::Absolute(1.5)));
        assert_eq!(parse_command("slippage 0.5%").unwrap(), SessionAction::Slippage(0.5));
        assert_eq!(
            parse_command("tokens dog wif").unwrap(),
            SessionAction::Tokens(Some("dog wif".to_string()))
        );
        assert_eq!(parse_command("select JUP").unwrap(), SessionAction::Select("JUP".to_string()));
    }

    #[test]
    fn parses_perp_commands() {
        assert_eq!(parse_command("perps").unwrap(), SessionAction::View(ViewMode::Perps));
        assert_eq!(
            parse_command("market eth").unwrap(),
            SessionAction::Market("PERP_ETH_USDC".to_string())
        );
        assert_eq!(parse_command("book").unwrap(), SessionAction::Book(None));
        assert_eq!(
            parse_command("ticket 100 5x").unwrap(),
            SessionAction::Ticket { margin: 100.0, leverage: 5 }
        );
        assert_eq!(
            parse_command("ticket 100").unwrap(),
            SessionAction::Ticket { margin: 100.0, leverage: 1 }
        );
    }

    #[test]
    fn rejects_malformed_commands() {
        assert!(parse_command("select").is_err());
        assert!(parse_command("buy lots").is_err());
        assert!(parse_command("ticket").is_err());
        assert!(parse_command("ticket 10 high").is_err());
        assert!(parse_command("launch").unwrap_err().to_string().contains("Unknown command"));
    }

    #[tokio::test]
    async fn select_and_amount_update_the_order() {
        let (mut session, _view) = build(false, false);

        session.handle_command(SessionAction::Select("bbb".to_string())).await.unwrap();
        session
            .handle_command(SessionAction::Side(TradeSide::Sell, Some(AmountInput::Absolute(3.0))))
            .await
            .unwrap();

        let input = session.state().quote_input();
        assert_eq!(input.token.unwrap().address, "mint-b");
        assert_eq!(input.side, TradeSide::Sell);
        assert_eq!(input.amount, 3.0);

        assert!(session.handle_command(SessionAction::Select("ZZZ".to_string())).await.is_err());
    }

    #[tokio::test]
    async fn percent_amount_needs_balances() {
        let (mut session, _view) = build(true, false);

        assert!(session
            .handle_command(SessionAction::Amount(AmountInput::Percent(50.0)))
            .await
            .is_err());

        session.handle_command(SessionAction::Balance).await.unwrap();
        session
            .handle_command(SessionAction::Amount(AmountInput::Percent(50.0)))
            .await
            .unwrap();
        assert_eq!(session.state().amount, 2.0);
    }

    #[tokio::test]
    async fn slippage_below_one_percent_is_raised() {
        let (mut session, view) = build(false, false);
        session.handle_command(SessionAction::Slippage(0.2)).await.unwrap();
        assert_eq!(session.state().slippage.bps(), 100);
        assert!(view.text().contains("Slippage 1.00%"));
    }

    #[tokio::test]
    async fn swap_requires_wallet_and_quote() {
        let (mut session, _view) = build(false, false);
        let err = session.handle_command(SessionAction::Swap).await.unwrap_err();
        assert!(err.to_string().contains("Wallet not connected"));

        let (mut session, _view) = build(true, false);
        let err = session.handle_command(SessionAction::Swap).await.unwrap_err();
        assert!(err.to_string().contains("No quote available"));
    }

    #[tokio::test]
    async fn successful_swap_clears_order_entry() {
        let (mut session, view) = build(true, false);
        session.handle_command(SessionAction::Amount(AmountInput::Absolute(1.0))).await.unwrap();
        ready(&mut session);

        session.handle_command(SessionAction::Swap).await.unwrap();

        assert_eq!(session.state().amount, 0.0);
        assert_eq!(session.state().quote, QuoteState::Idle);
        assert_eq!(session.state().last_signature.as_deref(), Some("5igSig"));
        assert!(view.text().contains("5igSig"));
    }

    #[tokio::test]
    async fn failed_swap_keeps_inputs_and_shows_reason() {
        let (mut session, view) = build(true, true);
        session.handle_command(SessionAction::Amount(AmountInput::Absolute(1.0))).await.unwrap();
        ready(&mut session);

        session.handle_command(SessionAction::Swap).await.unwrap();

        assert_eq!(session.state().amount, 1.0);
        assert!(session.state().quote.quote().is_some());
        assert!(view.text().contains("Error: Swap failed: Blockhash not found"));
    }

    #[tokio::test]
    async fn stale_quote_update_is_ignored() {
        let (mut session, view) = build(false, false);
        session.handle_command(SessionAction::Amount(AmountInput::Absolute(1.0))).await.unwrap();
        let stale = session.state().quote_input();
        session.handle_command(SessionAction::Amount(AmountInput::Absolute(2.0))).await.unwrap();

        session
            .on_quote(QuoteUpdate {
                input: stale,
                state: QuoteState::Failed("No routes found".to_string()),
            })
            .await
            .unwrap();

        assert_eq!(session.state().quote, QuoteState::Idle);
        assert!(!view.text().contains("No routes found"));
    }

    #[tokio::test]
    async fn ticket_uses_selected_market_price() {
        let (mut session, view) = build(false, false);
        assert!(session
            .handle_command(SessionAction::Ticket { margin: 100.0, leverage: 5 })
            .await
            .is_err());

        session.on_perp_markets(vec![market("PERP_SOL_USDC", 200.0)]);
        session
            .handle_command(SessionAction::Ticket { margin: 100.0, leverage: 5 })
            .await
            .unwrap();

        assert!(view.text().contains("PERP_SOL_USDC x5: size 2.5000 SOL"));
    }

    #[tokio::test]
    async fn book_command_stores_selected_market_book() {
        let (mut session, view) = build(false, false);
        session.on_perp_markets(vec![market("PERP_SOL_USDC", 100.0), market("PERP_ETH_USDC", 3000.0)]);

        session
            .handle_command(SessionAction::Market("PERP_ETH_USDC".to_string()))
            .await
            .unwrap();
        session.handle_command(SessionAction::Book(None)).await.unwrap();

        assert_eq!(session.state().order_book.as_ref().unwrap().symbol, "PERP_ETH_USDC");
        assert!(view.text().contains("state Spot"));
        assert!(session
            .handle_command(SessionAction::Market("PERP_DOGE_USDC".to_string()))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn balances_for_another_token_are_dropped() {
        let (mut session, _view) = build(true, false);
        session.on_balances(WalletBalances {
            owner: "o".to_string(),
            sol: 1.0,
            token_mint: Some("mint-b".to_string()),
            token: 5.0,
        });
        assert!(session.state().balances.is_none());
    }
}
