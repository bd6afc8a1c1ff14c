//! Trade lifecycle types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Trade status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// Why a trade was closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExitReason {
    StopLoss,
    TargetHit,
    StrategySignal,
}

impl fmt::Display for ExitReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExitReason::StopLoss => "Stop Loss",
            ExitReason::TargetHit => "Target Hit",
            ExitReason::StrategySignal => "Strategy Signal",
        };
        f.write_str(s)
    }
}

/// A single long trade from entry to (eventual) close.
///
/// While OPEN the trade is owned by the lifecycle manager; on close
/// it moves into the append-only history and is never mutated again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub symbol: String,
    pub entry_price: f64,
    pub entry_time: DateTime<Utc>,
    pub sl_price: f64,
    pub target_price: f64,
    pub qty: f64,
    pub status: TradeStatus,
    pub exit_price: Option<f64>,
    pub exit_time: Option<DateTime<Utc>>,
    pub exit_reason: Option<ExitReason>,
    pub pnl: Option<f64>,
}

impl Trade {
    /// Open a new trade with stop-loss and target derived from the
    /// risk percentages.
    pub fn open(
        symbol: impl Into<String>,
        entry_price: f64,
        entry_time: DateTime<Utc>,
        stop_loss_perc: f64,
        target_perc: f64,
        qty: f64,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            entry_price,
            entry_time,
            sl_price: entry_price * (1.0 - stop_loss_perc / 100.0),
            target_price: entry_price * (1.0 + target_perc / 100.0),
            qty,
            status: TradeStatus::Open,
            exit_price: None,
            exit_time: None,
            exit_reason: None,
            pnl: None,
        }
    }

    /// Close the trade. Sets all exit fields and the pnl together;
    /// transitions OPEN -> CLOSED exactly once.
    pub fn close(&mut self, exit_price: f64, exit_time: DateTime<Utc>, reason: ExitReason) {
        debug_assert_eq!(self.status, TradeStatus::Open);
        self.exit_price = Some(exit_price);
        self.exit_time = Some(exit_time);
        self.exit_reason = Some(reason);
        self.pnl = Some((exit_price - self.entry_price) * self.qty);
        self.status = TradeStatus::Closed;
    }

    /// Whether the trade is still open.
    #[inline]
    pub fn is_open(&self) -> bool {
        self.status == TradeStatus::Open
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_computes_levels() {
        let trade = Trade::open("NSE:SBIN-EQ", 100.0, Utc::now(), 1.0, 2.0, 1.0);

        assert_eq!(trade.sl_price, 99.0);
        assert_eq!(trade.target_price, 102.0);
        assert!(trade.is_open());
        assert!(trade.pnl.is_none());
    }

    #[test]
    fn test_close_sets_exit_fields_together() {
        let mut trade = Trade::open("TEST", 100.0, Utc::now(), 1.0, 2.0, 2.0);
        let at = Utc::now();
        trade.close(103.5, at, ExitReason::TargetHit);

        assert_eq!(trade.status, TradeStatus::Closed);
        assert_eq!(trade.exit_price, Some(103.5));
        assert_eq!(trade.exit_time, Some(at));
        assert_eq!(trade.exit_reason, Some(ExitReason::TargetHit));
        // pnl = (exit - entry) * qty, full precision
        assert_eq!(trade.pnl, Some((103.5 - 100.0) * 2.0));
    }

    #[test]
    fn test_exit_reason_display() {
        assert_eq!(ExitReason::StopLoss.to_string(), "Stop Loss");
        assert_eq!(ExitReason::TargetHit.to_string(), "Target Hit");
        assert_eq!(ExitReason::StrategySignal.to_string(), "Strategy Signal");
    }
}
