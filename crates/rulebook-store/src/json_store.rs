//! JSON-file backed run store.

use async_trait::async_trait;
use rulebook_core::error::StoreError;
use rulebook_core::traits::{RunRecord, RunStore, TradeRow};
use rulebook_core::types::Trade;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::{debug, info};

/// One persisted run with its trades. Runs and their trades live and
/// die together.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredRun {
    record: RunRecord,
    trades: Vec<Trade>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoreState {
    next_id: u64,
    runs: Vec<StoredRun>,
}

impl Default for StoreState {
    fn default() -> Self {
        Self {
            next_id: 1,
            runs: Vec::new(),
        }
    }
}

/// Stores runs in a single JSON document on disk. Ids are assigned
/// sequentially and never reused; at most `max_runs` of the most
/// recent runs are retained.
pub struct JsonRunStore {
    path: PathBuf,
    max_runs: usize,
    state: Mutex<StoreState>,
}

impl JsonRunStore {
    pub fn open(path: impl AsRef<Path>, max_runs: usize) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let state = if path.exists() {
            let text = std::fs::read_to_string(&path)?;
            serde_json::from_str(&text).map_err(|e| StoreError::Serialization(e.to_string()))?
        } else {
            StoreState::default()
        };
        debug!(path = %path.display(), runs = state.runs.len(), "run store opened");
        Ok(Self {
            path,
            max_runs,
            state: Mutex::new(state),
        })
    }

    fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let text = serde_json::to_string_pretty(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[async_trait]
impl RunStore for JsonRunStore {
    async fn save_run(&self, mut record: RunRecord, trades: &[Trade]) -> Result<u64, StoreError> {
        let mut state = self.state.lock().unwrap();

        let id = state.next_id;
        state.next_id += 1;
        record.id = id;
        state.runs.push(StoredRun {
            record,
            trades: trades.to_vec(),
        });

        // Retention: oldest runs fall off, trades with them.
        while state.runs.len() > self.max_runs {
            let dropped = state.runs.remove(0);
            info!(run_id = dropped.record.id, "evicting run past retention limit");
        }

        self.persist(&state)?;
        Ok(id)
    }

    async fn list_runs(&self) -> Result<Vec<RunRecord>, StoreError> {
        let state = self.state.lock().unwrap();
        Ok(state.runs.iter().map(|r| r.record.clone()).collect())
    }

    async fn delete_runs(&self, ids: &[u64]) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        state.runs.retain(|r| !ids.contains(&r.record.id));
        self.persist(&state)
    }

    async fn export_trades(&self, run_id: u64) -> Result<Vec<TradeRow>, StoreError> {
        let state = self.state.lock().unwrap();
        let run = state
            .runs
            .iter()
            .find(|r| r.record.id == run_id)
            .ok_or(StoreError::RunNotFound(run_id))?;
        Ok(run
            .trades
            .iter()
            .map(|t| TradeRow::from_trade(run_id, t))
            .collect())
    }
}

/// Render trade rows as CSV with a header row.
pub fn trades_to_csv(rows: &[TradeRow]) -> Result<String, StoreError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}
