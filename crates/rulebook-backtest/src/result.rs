//! Backtest result summary and report generation.

use chrono::Utc;
use rulebook_core::traits::RunRecord;
use rulebook_core::types::{OverrideMap, Trade};
use serde::{Deserialize, Serialize};

/// Outcome of one backtest run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacktestResult {
    pub strategy_name: String,
    pub symbol: String,
    /// Parameter overrides the run was executed with.
    pub parameters: OverrideMap,
    pub total_pnl: f64,
    /// Winning trades as a percentage of closed trades; 0 with no trades.
    pub win_rate: f64,
    pub total_trades: usize,
    pub bars_processed: usize,
    /// Store id assigned when the run is persisted; `None` for
    /// unsaved runs.
    #[serde(default)]
    pub run_id: Option<u64>,
    /// Closed trades, in entry order.
    pub trades: Vec<Trade>,
}

impl BacktestResult {
    /// An all-zero result for runs that could not be simulated.
    pub fn empty(strategy_name: &str, symbol: &str, parameters: OverrideMap) -> Self {
        Self {
            strategy_name: strategy_name.to_string(),
            symbol: symbol.to_string(),
            parameters,
            total_pnl: 0.0,
            win_rate: 0.0,
            total_trades: 0,
            bars_processed: 0,
            run_id: None,
            trades: Vec::new(),
        }
    }

    /// Build the persistable run record. The id is assigned by the
    /// store on save.
    pub fn to_record(&self) -> RunRecord {
        RunRecord {
            id: 0,
            strategy_name: self.strategy_name.clone(),
            symbol: self.symbol.clone(),
            parameters: self.parameters.clone(),
            total_pnl: self.total_pnl,
            win_rate: self.win_rate,
            total_trades: self.total_trades,
            timestamp: Utc::now(),
        }
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                     BACKTEST REPORT                        \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str(&format!("  Strategy:            {}\n", self.strategy_name));
        s.push_str(&format!("  Symbol:              {}\n", self.symbol));
        s.push_str(&format!("  Bars Processed:      {}\n", self.bars_processed));
        if let Some(run_id) = self.run_id {
            s.push_str(&format!("  Run Id:              {}\n", run_id));
        }
        s.push('\n');

        s.push_str("TRADE STATISTICS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!("  Total Trades:        {}\n", self.total_trades));
        s.push_str(&format!("  Win Rate:            {:.2}%\n", self.win_rate));
        s.push_str(&format!("  Total PnL:           {:.2}\n", self.total_pnl));
        s.push('\n');

        if !self.trades.is_empty() {
            s.push_str("TRADES\n");
            s.push_str("───────────────────────────────────────────────────────────\n");
            for trade in &self.trades {
                s.push_str(&format!(
                    "  {}  entry {:.2}  exit {}  pnl {}  ({})\n",
                    trade.entry_time.format("%Y-%m-%d %H:%M"),
                    trade.entry_price,
                    trade
                        .exit_price
                        .map(|p| format!("{:.2}", p))
                        .unwrap_or_else(|| "-".to_string()),
                    trade
                        .pnl
                        .map(|p| format!("{:.2}", p))
                        .unwrap_or_else(|| "-".to_string()),
                    trade
                        .exit_reason
                        .map(|r| r.to_string())
                        .unwrap_or_else(|| "open".to_string()),
                ));
            }
            s.push('\n');
        }

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_contains_key_figures() {
        let mut result = BacktestResult::empty("EMA Crossover", "NSE:SBIN-EQ", OverrideMap::new());
        result.total_pnl = 12.5;
        result.win_rate = 50.0;
        result.total_trades = 4;

        let summary = result.summary();
        assert!(summary.contains("EMA Crossover"));
        assert!(summary.contains("50.00%"));
        assert!(summary.contains("12.50"));
        // Unsaved runs carry no id line.
        assert!(!summary.contains("Run Id"));
    }

    #[test]
    fn test_summary_carries_assigned_run_id() {
        let mut result = BacktestResult::empty("s", "X", OverrideMap::new());
        result.run_id = Some(7);

        let summary = result.summary();
        assert!(summary.contains("Run Id:              7"));
    }

    #[test]
    fn test_record_carries_parameters() {
        let mut parameters = OverrideMap::new();
        parameters.insert(
            "ema_fast".to_string(),
            rulebook_core::types::IndicatorParamsPatch { period: Some(5) },
        );
        let result = BacktestResult::empty("s", "X", parameters.clone());

        let record = result.to_record();
        assert_eq!(record.id, 0);
        assert_eq!(record.parameters, parameters);
    }
}
