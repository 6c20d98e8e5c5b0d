use crate::entity::{
    OrderBook, PerpMarket, QuoteInput, QuoteState, QuoteToken, SlippageTolerance, Token, TokenCatalog,
    TradeSide, WalletBalances, DEFAULT_PERP_SYMBOL,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewMode {
    #[default]
    Spot,
    Perps,
}

/// Everything the terminal session shows. Owned by the session controller,
/// which is the only writer; background tasks hand results over by message.
#[derive(Debug, Clone)]
pub struct TerminalState {
    pub view_mode: ViewMode,
    pub catalog: TokenCatalog,
    pub selected_token: Option<Token>,
    pub side: TradeSide,
    pub amount: f64,
    pub slippage: SlippageTolerance,
    pub quote: QuoteState,
    pub balances: Option<WalletBalances>,
    pub perp_markets: Vec<PerpMarket>,
    pub selected_perp: String,
    pub order_book: Option<OrderBook>,
    pub last_signature: Option<String>,
}

impl Default for TerminalState {
    fn default() -> Self {
        Self {
            view_mode: ViewMode::default(),
            catalog: TokenCatalog::new(Vec::new()),
            selected_token: None,
            side: TradeSide::default(),
            amount: 0.0,
            slippage: SlippageTolerance::default(),
            quote: QuoteState::Idle,
            balances: None,
            perp_markets: Vec::new(),
            selected_perp: DEFAULT_PERP_SYMBOL.to_string(),
            order_book: None,
            last_signature: None,
        }
    }
}

impl TerminalState {
    pub fn quote_input(&self) -> QuoteInput {
        QuoteInput::new(
            self.side,
            self.amount,
            self.selected_token.as_ref().map(QuoteToken::from),
            self.slippage,
        )
    }

    /// Replace the catalog. The selected token must belong to the new catalog,
    /// otherwise selection falls back to the first entry.
    /// Returns true when the quote inputs changed.
    pub fn apply_catalog(&mut self, catalog: TokenCatalog) -> bool {
        let before = self.quote_input();

        let selected = self
            .selected_token
            .as_ref()
            .and_then(|current| catalog.get(&current.address))
            .or_else(|| catalog.first())
            .cloned();

        self.catalog = catalog;
        self.selected_token = selected;
        self.invalidate_quote_if_changed(before)
    }

    /// Select a token by address or symbol. Returns false when nothing matched.
    pub fn select_token(&mut self, key: &str) -> bool {
        let found = self.catalog.find(key).cloned();

        match found {
            Some(token) => {
                let before = self.quote_input();
                self.selected_token = Some(token);
                self.invalidate_quote_if_changed(before);
                true
            }
            None => false,
        }
    }

    pub fn set_side(&mut self, side: TradeSide) -> bool {
        let before = self.quote_input();
        self.side = side;
        self.invalidate_quote_if_changed(before)
    }

    pub fn set_amount(&mut self, amount: f64) -> bool {
        let before = self.quote_input();
        self.amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.invalidate_quote_if_changed(before)
    }

    pub fn set_slippage(&mut self, slippage: SlippageTolerance) -> bool {
        let before = self.quote_input();
        self.slippage = slippage;
        self.invalidate_quote_if_changed(before)
    }

    /// Set the amount as a percentage of the balance that pays for the trade:
    /// SOL when buying, the selected token when selling.
    pub fn set_amount_percent(&mut self, percent: f64) -> bool {
        let available = match (&self.balances, self.side) {
            (Some(b), TradeSide::Buy) => b.sol,
            (Some(b), TradeSide::Sell) => b.token,
            (None, _) => 0.0,
        };
        self.set_amount(amount_from_percent(percent, available))
    }

    /// Accept a quote result only if it was produced for the current inputs.
    pub fn apply_quote(&mut self, input: &QuoteInput, state: QuoteState) -> bool {
        if *input != self.quote_input() {
            return false;
        }
        self.quote = state;
        true
    }

    /// Replace the market list. Returns true when the selected symbol had to
    /// fall back because it is no longer listed.
    pub fn apply_perp_markets(&mut self, markets: Vec<PerpMarket>) -> bool {
        let mut changed = false;
        if !markets.iter().any(|m| m.symbol == self.selected_perp) {
            let fallback = markets
                .first()
                .map(|m| m.symbol.clone())
                .unwrap_or_else(|| DEFAULT_PERP_SYMBOL.to_string());
            changed = fallback != self.selected_perp;
            self.selected_perp = fallback;
        }
        if changed {
            self.order_book = None;
        }
        self.perp_markets = markets;
        changed
    }

    /// Select a listed perp market. Returns false when the symbol is unknown.
    pub fn select_perp(&mut self, symbol: &str) -> bool {
        if !self.perp_markets.iter().any(|m| m.symbol == symbol) {
            return false;
        }
        if self.selected_perp != symbol {
            self.selected_perp = symbol.to_string();
            self.order_book = None;
        }
        true
    }

    /// Keep an order book only if it belongs to the selected market
    pub fn apply_order_book(&mut self, book: OrderBook) -> bool {
        if book.symbol != self.selected_perp {
            return false;
        }
        self.order_book = Some(book);
        true
    }

    pub fn selected_perp_market(&self) -> Option<&PerpMarket> {
        self.perp_markets
            .iter()
            .find(|m| m.symbol == self.selected_perp)
    }

    /// Reset order entry after a successful swap
    pub fn clear_after_swap(&mut self, signature: String) {
        self.amount = 0.0;
        self.quote = QuoteState::Idle;
        self.last_signature = Some(signature);
    }

    fn invalidate_quote_if_changed(&mut self, before: QuoteInput) -> bool {
        if before == self.quote_input() {
            return false;
        }
        self.quote = QuoteState::Idle;
        true
    }
}

pub fn amount_from_percent(percent: f64, available: f64) -> f64 {
    if !percent.is_finite() || !available.is_finite() {
        return 0.0;
    }
    percent.clamp(0.0, 100.0) / 100.0 * available.max(0.0)
}
