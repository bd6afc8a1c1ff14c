//! Active strategy set with atomic reload.

use std::sync::{Arc, RwLock};

use rulebook_core::error::StrategyError;
use rulebook_core::types::StrategyDefinition;
use tracing::{info, warn};

use crate::source::StrategySource;

/// Holds the currently active strategies. `reload` builds a fresh set
/// from the source and swaps it in whole, so readers never observe a
/// partially loaded mix of old and new definitions.
pub struct StrategyRegistry {
    source: Arc<dyn StrategySource>,
    active: RwLock<Arc<Vec<Arc<StrategyDefinition>>>>,
}

impl StrategyRegistry {
    pub fn new(source: Arc<dyn StrategySource>) -> Self {
        Self {
            source,
            active: RwLock::new(Arc::new(Vec::new())),
        }
    }

    /// Re-enumerate the source and replace the active set. Malformed
    /// or invalid units are skipped with a warning and do not affect
    /// the rest of the load. Returns the number of active strategies.
    pub fn reload(&self) -> Result<usize, StrategyError> {
        let units = self.source.enumerate()?;
        let mut loaded: Vec<Arc<StrategyDefinition>> = Vec::with_capacity(units.len());

        for (unit, text) in units {
            let mut def: StrategyDefinition = match serde_json::from_str(&text) {
                Ok(def) => def,
                Err(e) => {
                    warn!(unit = %unit, error = %e, "skipping malformed strategy");
                    continue;
                }
            };
            if let Err(e) = def.validate() {
                warn!(unit = %unit, error = %e, "skipping invalid strategy");
                continue;
            }
            if def.id.is_empty() {
                def.id = def.name.clone();
            }
            if loaded.iter().any(|existing| existing.id == def.id) {
                warn!(unit = %unit, id = %def.id, "skipping strategy with duplicate id");
                continue;
            }
            loaded.push(Arc::new(def));
        }

        let count = loaded.len();
        *self.active.write().unwrap() = Arc::new(loaded);
        info!(count, "strategy registry reloaded");
        Ok(count)
    }

    /// Snapshot of the active set.
    pub fn strategies(&self) -> Arc<Vec<Arc<StrategyDefinition>>> {
        Arc::clone(&self.active.read().unwrap())
    }

    /// Active strategies bound to a symbol.
    pub fn for_symbol(&self, symbol: &str) -> Vec<Arc<StrategyDefinition>> {
        self.strategies()
            .iter()
            .filter(|def| def.symbol == symbol)
            .cloned()
            .collect()
    }

    /// Look up one strategy by id.
    pub fn get(&self, id: &str) -> Result<Arc<StrategyDefinition>, StrategyError> {
        self.strategies()
            .iter()
            .find(|def| def.id == id)
            .cloned()
            .ok_or_else(|| StrategyError::NotFound(id.to_string()))
    }
}
