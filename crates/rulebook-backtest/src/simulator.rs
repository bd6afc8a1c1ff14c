//! Bar-by-bar strategy replay over historical data.

use rulebook_core::error::StrategyError;
use rulebook_core::types::{
    Bar, ExitReason, IndicatorFrame, OverrideMap, StrategyDefinition, Trade,
};
use rulebook_indicators::apply_indicators;
use rulebook_strategy::signals_at;
use tracing::{debug, info};

use crate::result::BacktestResult;

/// Fewer bars than this and no meaningful simulation is possible.
const MIN_BARS: usize = 20;
/// Bars skipped at the start so indicators have history behind them.
const WARMUP_BARS: usize = 50;
/// Backtests trade a fixed single unit.
const BACKTEST_QTY: f64 = 1.0;

/// Replays a strategy over a bar series. Indicators are computed once
/// over the full series; evaluation at bar `i` only reads values at
/// `i` and `i - 1`, so results match what live processing of the same
/// bars would have decided.
pub struct BacktestSimulator;

impl BacktestSimulator {
    /// Run one backtest. `overrides` are merged into a copy of the
    /// definition; the passed definition is never modified. The merged
    /// definition is re-validated, so overrides cannot smuggle in
    /// parameters the registry would have rejected.
    pub fn run(
        definition: &StrategyDefinition,
        bars: &[Bar],
        overrides: &OverrideMap,
    ) -> Result<BacktestResult, StrategyError> {
        let definition = definition.with_overrides(overrides);
        definition.validate()?;

        if bars.len() < MIN_BARS {
            info!(
                strategy = %definition.name,
                bars = bars.len(),
                "not enough bars to simulate"
            );
            return Ok(BacktestResult::empty(
                &definition.name,
                &definition.symbol,
                overrides.clone(),
            ));
        }

        let risk = &definition.risk_management;

        let mut frame = IndicatorFrame::new(bars.to_vec());
        apply_indicators(&mut frame, &definition.indicators);

        let start_idx = WARMUP_BARS.min(bars.len() - 1);
        let mut active: Option<Trade> = None;
        let mut closed: Vec<Trade> = Vec::new();

        for idx in start_idx..bars.len() {
            let bar = &bars[idx];
            let time = bar.datetime();

            // Risk exits first, at the theoretical level rather than
            // the bar close: a close through the stop fills at the
            // stop price.
            if let Some(mut trade) = active.take() {
                if bar.close <= trade.sl_price {
                    trade.close(trade.sl_price, time, ExitReason::StopLoss);
                } else if bar.close >= trade.target_price {
                    trade.close(trade.target_price, time, ExitReason::TargetHit);
                }
                if trade.is_open() {
                    active = Some(trade);
                } else {
                    closed.push(trade);
                }
            }

            let sig = signals_at(&definition, &frame, idx);
            if sig.entry && active.is_none() {
                debug!(idx, price = bar.close, "backtest entry");
                active = Some(Trade::open(
                    &definition.symbol,
                    bar.close,
                    time,
                    risk.stop_loss_perc,
                    risk.target_perc,
                    BACKTEST_QTY,
                ));
            } else if sig.exit {
                if let Some(mut trade) = active.take() {
                    trade.close(bar.close, time, ExitReason::StrategySignal);
                    closed.push(trade);
                }
            }
        }

        let total_trades = closed.len();
        let total_pnl: f64 = closed.iter().filter_map(|t| t.pnl).sum();
        let winners = closed.iter().filter(|t| t.pnl.unwrap_or(0.0) > 0.0).count();
        let win_rate = if total_trades > 0 {
            winners as f64 / total_trades as f64 * 100.0
        } else {
            0.0
        };

        info!(
            strategy = %definition.name,
            total_trades,
            total_pnl,
            win_rate,
            "backtest complete"
        );

        Ok(BacktestResult {
            strategy_name: definition.name.clone(),
            symbol: definition.symbol.clone(),
            parameters: overrides.clone(),
            total_pnl,
            win_rate,
            total_trades,
            bars_processed: bars.len(),
            run_id: None,
            trades: closed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_core::types::IndicatorParamsPatch;

    fn definition(entry: &str, exit: &str) -> StrategyDefinition {
        let json = format!(
            r#"{{
                "name": "test",
                "symbol": "NSE:SBIN-EQ",
                "indicators": [],
                "entry_conditions": {entry},
                "exit_conditions": {exit},
                "risk_management": {{"stop_loss_perc": 1.0, "target_perc": 2.0}}
            }}"#
        );
        serde_json::from_str(&json).unwrap()
    }

    fn bars_from_closes(closes: &[f64]) -> Vec<Bar> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| Bar::from_close(i as i64 * 60_000, c))
            .collect()
    }

    #[test]
    fn test_too_few_bars_yields_zeroed_result() {
        let def = definition(
            r#"{"operator": ">", "left": "close", "right": 0}"#,
            r#"{"operator": "<", "left": "close", "right": 0}"#,
        );
        let bars = bars_from_closes(&[100.0; 19]);

        let result = BacktestSimulator::run(&def, &bars, &OverrideMap::new()).unwrap();

        assert_eq!(result.total_trades, 0);
        assert_eq!(result.total_pnl, 0.0);
        assert_eq!(result.win_rate, 0.0);
        assert!(result.trades.is_empty());
    }

    #[test]
    fn test_flat_series_with_never_firing_conditions() {
        let def = definition(
            r#"{"operator": "<", "left": "close", "right": 0}"#,
            r#"{"operator": "<", "left": "close", "right": 0}"#,
        );
        let bars = bars_from_closes(&[100.0; 80]);

        let result = BacktestSimulator::run(&def, &bars, &OverrideMap::new()).unwrap();

        assert_eq!(result.total_trades, 0);
        assert_eq!(result.bars_processed, 80);
    }

    #[test]
    fn test_stop_loss_exits_at_threshold_price() {
        // Always-true entry: the first evaluated bar (index 50) opens
        // the trade at 100 with the stop at 99.
        let def = definition(
            r#"{"operator": ">", "left": "close", "right": 0}"#,
            r#"{"operator": "<", "left": "close", "right": -1}"#,
        );
        let mut closes = vec![100.0; 59];
        closes.push(98.5); // bar 59 closes through the stop
        let bars = bars_from_closes(&closes);

        let result = BacktestSimulator::run(&def, &bars, &OverrideMap::new()).unwrap();

        // The stop-loss trade closes, then the always-true entry
        // re-enters on the same bar and stays open past the end; open
        // trades are not counted.
        assert_eq!(result.total_trades, 1);
        let trade = &result.trades[0];
        assert_eq!(trade.entry_price, 100.0);
        assert_eq!(trade.exit_price, Some(99.0));
        assert_eq!(trade.exit_reason, Some(ExitReason::StopLoss));
        assert_eq!(trade.pnl, Some(-1.0));
        assert_eq!(result.total_pnl, -1.0);
        assert_eq!(result.win_rate, 0.0);
    }

    #[test]
    fn test_target_exits_at_threshold_price() {
        let def = definition(
            r#"{"operator": "==", "left": "close", "right": 100}"#,
            r#"{"operator": "<", "left": "close", "right": -1}"#,
        );
        let mut closes = vec![100.0; 55];
        closes.extend_from_slice(&[103.0, 103.0, 103.0, 103.0, 103.0]);
        let bars = bars_from_closes(&closes);

        let result = BacktestSimulator::run(&def, &bars, &OverrideMap::new()).unwrap();

        assert_eq!(result.total_trades, 1);
        let trade = &result.trades[0];
        assert_eq!(trade.exit_price, Some(102.0));
        assert_eq!(trade.exit_reason, Some(ExitReason::TargetHit));
        assert_eq!(trade.pnl, Some(2.0));
        assert_eq!(result.win_rate, 100.0);
    }

    #[test]
    fn test_signal_exit_at_close_and_entry_priority() {
        // Enter at 100, exit on signal when close == 101.
        let def = definition(
            r#"{"operator": "==", "left": "close", "right": 100}"#,
            r#"{"operator": "==", "left": "close", "right": 101}"#,
        );
        let mut closes = vec![100.0; 55];
        closes.extend_from_slice(&[100.5, 101.0, 100.5, 100.5, 100.5]);
        let bars = bars_from_closes(&closes);

        let result = BacktestSimulator::run(&def, &bars, &OverrideMap::new()).unwrap();

        assert_eq!(result.total_trades, 1);
        let trade = &result.trades[0];
        assert_eq!(trade.exit_price, Some(101.0));
        assert_eq!(trade.exit_reason, Some(ExitReason::StrategySignal));
        assert_eq!(trade.pnl, Some(1.0));
    }

    #[test]
    fn test_short_series_evaluates_only_last_bar() {
        // 30 bars: start index is min(50, 29) = 29, so only the last
        // bar is evaluated and an entry there stays open.
        let def = definition(
            r#"{"operator": ">", "left": "close", "right": 0}"#,
            r#"{"operator": "<", "left": "close", "right": -1}"#,
        );
        let bars = bars_from_closes(&[100.0; 30]);

        let result = BacktestSimulator::run(&def, &bars, &OverrideMap::new()).unwrap();
        assert_eq!(result.total_trades, 0);
    }

    #[test]
    fn test_zero_period_override_is_rejected() {
        let json = r#"{
            "name": "ema entry",
            "symbol": "NSE:SBIN-EQ",
            "indicators": [{"id": "ema_fast", "type": "ema", "params": {"period": 9}}],
            "entry_conditions": {"operator": ">", "left": "ema_fast", "right": 0},
            "exit_conditions": {"operator": "<", "left": "ema_fast", "right": 0}
        }"#;
        let def: StrategyDefinition = serde_json::from_str(json).unwrap();
        let bars = bars_from_closes(&[100.0; 60]);

        let mut overrides = OverrideMap::new();
        overrides.insert(
            "ema_fast".to_string(),
            IndicatorParamsPatch { period: Some(0) },
        );

        // A zero period would bypass the registry's load-time checks;
        // the merged definition must fail validation instead of
        // reaching the indicator constructors.
        let err = BacktestSimulator::run(&def, &bars, &overrides).unwrap_err();
        assert!(matches!(err, StrategyError::InvalidDefinition(_)));

        // The same overrides on a short series are rejected too, not
        // short-circuited into a zeroed result.
        assert!(BacktestSimulator::run(&def, &bars[..5], &overrides).is_err());
    }

    #[test]
    fn test_deterministic_and_base_definition_untouched() {
        let def = definition(
            r#"{"operator": "==", "left": "close", "right": 100}"#,
            r#"{"operator": "==", "left": "close", "right": 101}"#,
        );
        let mut closes = vec![100.0; 55];
        closes.extend_from_slice(&[101.0; 10]);
        let bars = bars_from_closes(&closes);

        let mut overrides = OverrideMap::new();
        overrides.insert(
            "ema_fast".to_string(),
            IndicatorParamsPatch { period: Some(5) },
        );

        let snapshot = def.clone();
        let a = BacktestSimulator::run(&def, &bars, &overrides).unwrap();
        let b = BacktestSimulator::run(&def, &bars, &overrides).unwrap();

        assert_eq!(def, snapshot);
        assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
        assert_eq!(a.parameters, overrides);
    }
}
