//! Trade lifecycle: entry, risk exits, and signal exits.

use chrono::{DateTime, Utc};
use rulebook_core::traits::Broker;
use rulebook_core::types::{ExitReason, OrderRequest, RiskParams, Side, Trade};
use rulebook_strategy::Signals;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{error, info};

/// Owns all open trades (at most one per symbol) and the append-only
/// closed-trade history.
///
/// Risk exits must be checked against a new price BEFORE strategy
/// signals are evaluated for it; a tick that breaches the stop and
/// also fires an entry must first close the old trade.
pub struct TradeLifecycleManager {
    broker: Arc<dyn Broker>,
    /// In paper mode no orders are dispatched to the broker.
    paper: bool,
    default_qty: f64,
    active: HashMap<String, Trade>,
    history: Vec<Trade>,
}

impl TradeLifecycleManager {
    pub fn new(broker: Arc<dyn Broker>, paper: bool, default_qty: f64) -> Self {
        Self {
            broker,
            paper,
            default_qty,
            active: HashMap::new(),
            history: Vec::new(),
        }
    }

    /// Close the open trade for `symbol` if the price breaches its
    /// stop-loss or target. Stop-loss wins when both are breached.
    /// The live path exits at the observed tick price, not at the
    /// theoretical level.
    pub async fn check_risk(
        &mut self,
        symbol: &str,
        price: f64,
        time: DateTime<Utc>,
    ) -> Option<ExitReason> {
        let trade = self.active.get(symbol)?;
        let reason = if price <= trade.sl_price {
            ExitReason::StopLoss
        } else if price >= trade.target_price {
            ExitReason::TargetHit
        } else {
            return None;
        };
        self.close_trade(symbol, price, time, reason).await;
        Some(reason)
    }

    /// React to strategy signals for one symbol. Entry takes priority
    /// over exit on the same tick; an entry signal is ignored while a
    /// trade is already open.
    pub async fn apply_signal(
        &mut self,
        symbol: &str,
        risk: &RiskParams,
        signals: Signals,
        price: f64,
        time: DateTime<Utc>,
    ) {
        if signals.entry && !self.active.contains_key(symbol) {
            self.open_trade(symbol, risk, price, time).await;
        } else if signals.exit && self.active.contains_key(symbol) {
            self.close_trade(symbol, price, time, ExitReason::StrategySignal)
                .await;
        }
    }

    async fn open_trade(&mut self, symbol: &str, risk: &RiskParams, price: f64, time: DateTime<Utc>) {
        let trade = Trade::open(
            symbol,
            price,
            time,
            risk.stop_loss_perc,
            risk.target_perc,
            self.default_qty,
        );
        info!(
            symbol,
            entry_price = price,
            sl_price = trade.sl_price,
            target_price = trade.target_price,
            "entering trade"
        );
        self.dispatch_order(symbol, trade.qty, Side::Buy).await;
        self.active.insert(symbol.to_string(), trade);
    }

    async fn close_trade(&mut self, symbol: &str, price: f64, time: DateTime<Utc>, reason: ExitReason) {
        let Some(mut trade) = self.active.remove(symbol) else {
            return;
        };
        trade.close(price, time, reason);
        info!(
            symbol,
            exit_price = price,
            pnl = trade.pnl.unwrap_or(0.0),
            reason = %reason,
            "exiting trade"
        );
        self.dispatch_order(symbol, trade.qty, Side::Sell).await;
        self.history.push(trade);
    }

    /// Sends a market order unless running in paper mode. Broker
    /// failures are logged; the internal trade state already reflects
    /// the decision and is not rolled back.
    async fn dispatch_order(&self, symbol: &str, qty: f64, side: Side) {
        if self.paper {
            return;
        }
        let request = OrderRequest::market(symbol, qty, side);
        match self.broker.place_order(request).await {
            Ok(ack) => info!(symbol, order_id = %ack.order_id, ?side, "order placed"),
            Err(e) => error!(symbol, ?side, error = %e, "order dispatch failed"),
        }
    }

    /// The open trade for a symbol, if any.
    pub fn active_trade(&self, symbol: &str) -> Option<&Trade> {
        self.active.get(symbol)
    }

    /// All open trades.
    pub fn active_trades(&self) -> impl Iterator<Item = &Trade> {
        self.active.values()
    }

    /// Closed trades, oldest first.
    pub fn history(&self) -> &[Trade] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_broker::PaperBroker;

    fn manager(paper: bool) -> (TradeLifecycleManager, Arc<PaperBroker>) {
        let broker = Arc::new(PaperBroker::new());
        (
            TradeLifecycleManager::new(broker.clone(), paper, 1.0),
            broker,
        )
    }

    fn entry() -> Signals {
        Signals {
            entry: true,
            exit: false,
        }
    }

    fn exit() -> Signals {
        Signals {
            entry: false,
            exit: true,
        }
    }

    #[tokio::test]
    async fn test_at_most_one_open_trade_per_symbol() {
        let (mut mgr, _) = manager(true);
        let risk = RiskParams::default();
        let now = Utc::now();

        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 100.0, now).await;
        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 105.0, now).await;

        let trade = mgr.active_trade("NSE:SBIN-EQ").unwrap();
        assert_eq!(trade.entry_price, 100.0);
        assert_eq!(mgr.active_trades().count(), 1);
    }

    #[tokio::test]
    async fn test_stop_loss_closes_at_tick_price() {
        let (mut mgr, _) = manager(true);
        let risk = RiskParams {
            stop_loss_perc: 1.0,
            target_perc: 2.0,
        };
        let now = Utc::now();

        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 100.0, now).await;
        // sl at 99.0; tick gaps below it
        let reason = mgr.check_risk("NSE:SBIN-EQ", 98.5, now).await;

        assert_eq!(reason, Some(ExitReason::StopLoss));
        assert!(mgr.active_trade("NSE:SBIN-EQ").is_none());

        let closed = &mgr.history()[0];
        assert_eq!(closed.exit_price, Some(98.5));
        assert_eq!(closed.pnl, Some(-1.5));
    }

    #[tokio::test]
    async fn test_target_hit_and_history_order() {
        let (mut mgr, _) = manager(true);
        let risk = RiskParams::default();
        let now = Utc::now();

        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 100.0, now).await;
        assert_eq!(
            mgr.check_risk("NSE:SBIN-EQ", 102.0, now).await,
            Some(ExitReason::TargetHit)
        );

        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 50.0, now).await;
        mgr.apply_signal("NSE:SBIN-EQ", &risk, exit(), 51.0, now).await;

        let history = mgr.history();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].exit_reason, Some(ExitReason::TargetHit));
        assert_eq!(history[1].exit_reason, Some(ExitReason::StrategySignal));
        assert_eq!(history[1].pnl, Some(1.0));
    }

    #[tokio::test]
    async fn test_no_risk_exit_inside_band() {
        let (mut mgr, _) = manager(true);
        let risk = RiskParams::default();
        let now = Utc::now();

        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 100.0, now).await;
        assert_eq!(mgr.check_risk("NSE:SBIN-EQ", 100.5, now).await, None);
        assert!(mgr.active_trade("NSE:SBIN-EQ").is_some());
    }

    #[tokio::test]
    async fn test_live_mode_dispatches_orders() {
        let (mut mgr, broker) = manager(false);
        let risk = RiskParams::default();
        let now = Utc::now();

        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 100.0, now).await;
        mgr.apply_signal("NSE:SBIN-EQ", &risk, exit(), 101.0, now).await;

        let orders = broker.recorded_orders();
        assert_eq!(orders.len(), 2);
        assert_eq!(orders[0].side, Side::Buy);
        assert_eq!(orders[1].side, Side::Sell);
    }

    #[tokio::test]
    async fn test_paper_mode_skips_broker() {
        let (mut mgr, broker) = manager(true);
        let risk = RiskParams::default();
        let now = Utc::now();

        mgr.apply_signal("NSE:SBIN-EQ", &risk, entry(), 100.0, now).await;
        mgr.apply_signal("NSE:SBIN-EQ", &risk, exit(), 101.0, now).await;

        assert!(broker.recorded_orders().is_empty());
        assert_eq!(mgr.history().len(), 1);
    }
}
