//! Backtest run persistence trait and wire records.

use crate::error::StoreError;
use crate::types::{OverrideMap, Trade};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Persisted summary of one backtest run. Field names are the wire
/// contract for storage and export integrations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Assigned by the store on save; 0 before persistence.
    pub id: u64,
    pub strategy_name: String,
    pub symbol: String,
    pub parameters: OverrideMap,
    pub total_pnl: f64,
    pub win_rate: f64,
    pub total_trades: usize,
    pub timestamp: DateTime<Utc>,
}

/// One exported trade row of a persisted run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRow {
    pub run_id: u64,
    pub symbol: String,
    pub entry_price: f64,
    pub exit_price: Option<f64>,
    pub entry_time: DateTime<Utc>,
    pub exit_time: Option<DateTime<Utc>>,
    pub pnl: Option<f64>,
    pub exit_reason: Option<String>,
}

impl TradeRow {
    /// Flatten a closed trade into its export row.
    pub fn from_trade(run_id: u64, trade: &Trade) -> Self {
        Self {
            run_id,
            symbol: trade.symbol.clone(),
            entry_price: trade.entry_price,
            exit_price: trade.exit_price,
            entry_time: trade.entry_time,
            exit_time: trade.exit_time,
            pnl: trade.pnl,
            exit_reason: trade.exit_reason.map(|r| r.to_string()),
        }
    }
}

/// Trait for persistent backtest run storage.
#[async_trait]
pub trait RunStore: Send + Sync {
    /// Persist a run and its trades; returns the assigned run id.
    /// Implementations enforce their retention policy here.
    async fn save_run(&self, record: RunRecord, trades: &[Trade]) -> Result<u64, StoreError>;

    /// List persisted runs, oldest first.
    async fn list_runs(&self) -> Result<Vec<RunRecord>, StoreError>;

    /// Delete runs and their trades as a unit.
    async fn delete_runs(&self, ids: &[u64]) -> Result<(), StoreError>;

    /// Export the trade rows of one run.
    async fn export_trades(&self, run_id: u64) -> Result<Vec<TradeRow>, StoreError>;
}
