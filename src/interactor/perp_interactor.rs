use crate::entity::{OrderBook, PerpMarket, PerpMarketInfo, PerpOrderTicket, TerminalError};
use crate::orderly::PerpMarketService;
use anyhow::Result;
use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::sync::Arc;

pub const MIN_LEVERAGE: u32 = 1;
pub const MAX_LEVERAGE: u32 = 100;

#[async_trait]
pub trait PerpInteractor: Send + Sync {
    /// Top markets with the latest estimated funding rate merged in
    async fn load_markets(&self) -> Result<Vec<PerpMarket>>;

    async fn get_market_info(&self, symbol: &str) -> Result<PerpMarketInfo>;

    async fn get_order_book(&self, symbol: &str) -> Result<OrderBook>;
}

pub struct PerpInteractorImpl {
    market_service: Arc<dyn PerpMarketService>,
    orderbook_depth: usize,
}

impl PerpInteractorImpl {
    pub fn new(market_service: Arc<dyn PerpMarketService>, orderbook_depth: usize) -> Self {
        Self {
            market_service,
            orderbook_depth,
        }
    }
}

#[async_trait]
impl PerpInteractor for PerpInteractorImpl {
    async fn load_markets(&self) -> Result<Vec<PerpMarket>> {
        let markets = self.market_service.get_markets().await?;

        // Funding rates are an enrichment; the futures rows already carry an estimate
        let funding = match self.market_service.get_funding_rates().await {
            Ok(rates) => rates,
            Err(e) => {
                warn!("Funding rates unavailable: {}", e);
                HashMap::new()
            }
        };

        Ok(merge_funding_rates(markets, &funding))
    }

    async fn get_market_info(&self, symbol: &str) -> Result<PerpMarketInfo> {
        self.market_service.get_market_info(symbol).await
    }

    async fn get_order_book(&self, symbol: &str) -> Result<OrderBook> {
        self.market_service
            .get_order_book(symbol, self.orderbook_depth)
            .await
    }
}

pub fn merge_funding_rates(markets: Vec<PerpMarket>, funding: &HashMap<String, f64>) -> Vec<PerpMarket> {
    markets
        .into_iter()
        .map(|mut market| {
            if let Some(rate) = funding.get(&market.symbol) {
                market.funding_rate = Some(*rate);
            }
            market
        })
        .collect()
}

/// Size an order: quantity = margin * leverage / price. Leverage is clamped
/// to 1..=100.
pub fn build_order_ticket(margin: f64, leverage: u32, price: f64) -> Result<PerpOrderTicket> {
    if !margin.is_finite() || margin <= 0.0 || !price.is_finite() || price <= 0.0 {
        return Err(TerminalError::InvalidAmount.into());
    }

    let leverage = leverage.clamp(MIN_LEVERAGE, MAX_LEVERAGE);
    let quantity = margin * leverage as f64 / price;

    Ok(PerpOrderTicket {
        margin,
        leverage,
        price,
        quantity,
        notional: quantity * price,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    fn market(symbol: &str, funding_rate: Option<f64>) -> PerpMarket {
        PerpMarket {
            symbol: symbol.to_string(),
            mark_price: 150.0,
            index_price: 150.1,
            change_24h: 1.5,
            volume_24h: 1_000_000.0,
            open_interest: 50_000.0,
            funding_rate,
        }
    }

    struct FakeMarkets {
        funding: Option<HashMap<String, f64>>,
    }

    #[async_trait]
    impl PerpMarketService for FakeMarkets {
        async fn get_markets(&self) -> Result<Vec<PerpMarket>> {
            Ok(vec![market("PERP_SOL_USDC", Some(0.0001)), market("PERP_BTC_USDC", None)])
        }

        async fn get_funding_rates(&self) -> Result<HashMap<String, f64>> {
            self.funding.clone().ok_or_else(|| anyhow!("funding endpoint down"))
        }

        async fn get_market_info(&self, symbol: &str) -> Result<PerpMarketInfo> {
            Ok(PerpMarketInfo {
                symbol: symbol.to_string(),
                base_min: None,
                base_max: None,
                base_tick: None,
                quote_tick: None,
                max_leverage: Some(20.0),
            })
        }

        async fn get_order_book(&self, symbol: &str, depth: usize) -> Result<OrderBook> {
            Ok(OrderBook {
                symbol: format!("{}@{}", symbol, depth),
                ..OrderBook::default()
            })
        }
    }

    #[tokio::test]
    async fn funding_rates_override_row_estimates() {
        let funding = HashMap::from([("PERP_BTC_USDC".to_string(), -0.0003)]);
        let interactor = PerpInteractorImpl::new(Arc::new(FakeMarkets { funding: Some(funding) }), 15);

        let markets = interactor.load_markets().await.unwrap();

        assert_eq!(markets[0].funding_rate, Some(0.0001));
        assert_eq!(markets[1].funding_rate, Some(-0.0003));
    }

    #[tokio::test]
    async fn markets_load_without_funding_rates() {
        let interactor = PerpInteractorImpl::new(Arc::new(FakeMarkets { funding: None }), 15);
        let markets = interactor.load_markets().await.unwrap();
        assert_eq!(markets.len(), 2);
        assert_eq!(markets[1].funding_rate, None);
    }

    #[tokio::test]
    async fn order_book_uses_configured_depth() {
        let interactor = PerpInteractorImpl::new(Arc::new(FakeMarkets { funding: None }), 15);
        let book = interactor.get_order_book("PERP_SOL_USDC").await.unwrap();
        assert_eq!(book.symbol, "PERP_SOL_USDC@15");
    }

    #[test]
    fn ticket_sizes_by_margin_and_leverage() {
        let ticket = build_order_ticket(100.0, 10, 200.0).unwrap();
        assert_eq!(ticket.quantity, 5.0);
        assert_eq!(ticket.notional, 1_000.0);
    }

    #[test]
    fn ticket_clamps_leverage() {
        assert_eq!(build_order_ticket(10.0, 0, 1.0).unwrap().leverage, 1);
        assert_eq!(build_order_ticket(10.0, 500, 1.0).unwrap().leverage, 100);
    }

    #[test]
    fn ticket_rejects_bad_inputs() {
        assert!(build_order_ticket(0.0, 10, 100.0).is_err());
        assert!(build_order_ticket(10.0, 10, 0.0).is_err());
        assert!(build_order_ticket(f64::NAN, 10, 100.0).is_err());
    }
}
