//! Live tick processing loop.

use chrono::{DateTime, Utc};
use rulebook_core::types::{Bar, BarSeries, IndicatorFrame};
use rulebook_indicators::apply_indicators;
use rulebook_strategy::{signals, StrategyRegistry};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::lifecycle::TradeLifecycleManager;

/// Drives strategies from incoming tick prices.
///
/// Each tick is synthesized into a flat bar, appended to the symbol's
/// bounded series, and every strategy bound to the symbol is
/// re-evaluated against the latest bar.
pub struct LiveEngine {
    registry: Arc<StrategyRegistry>,
    lifecycle: TradeLifecycleManager,
    series: HashMap<String, BarSeries>,
    series_capacity: usize,
}

impl LiveEngine {
    pub fn new(
        registry: Arc<StrategyRegistry>,
        lifecycle: TradeLifecycleManager,
        series_capacity: usize,
    ) -> Self {
        Self {
            registry,
            lifecycle,
            series: HashMap::new(),
            series_capacity,
        }
    }

    /// Process one tick. Risk exits are checked against the raw price
    /// before the tick becomes a bar and strategies are evaluated.
    pub async fn on_tick(&mut self, symbol: &str, price: f64, time: DateTime<Utc>) {
        self.lifecycle.check_risk(symbol, price, time).await;

        let capacity = self.series_capacity;
        let series = self
            .series
            .entry(symbol.to_string())
            .or_insert_with(|| BarSeries::with_capacity(symbol.to_string(), capacity));
        series.push(Bar::from_close(time.timestamp_millis(), price));
        let bars = series.to_vec();

        for def in self.registry.for_symbol(symbol) {
            let mut frame = IndicatorFrame::new(bars.clone());
            apply_indicators(&mut frame, &def.indicators);
            let sig = signals(&def, &frame);
            debug!(symbol, strategy = %def.id, entry = sig.entry, exit = sig.exit, "evaluated tick");
            self.lifecycle
                .apply_signal(symbol, &def.risk_management, sig, price, time)
                .await;
        }
    }

    /// Swap in the latest strategy set from the registry's source.
    pub fn reload_strategies(&self) -> Result<usize, rulebook_core::error::StrategyError> {
        self.registry.reload()
    }

    pub fn lifecycle(&self) -> &TradeLifecycleManager {
        &self.lifecycle
    }
}
