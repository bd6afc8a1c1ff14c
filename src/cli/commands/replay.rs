//! Replay command: drive the live tick path from historical bars.

use anyhow::{Context, Result};
use rulebook_broker::PaperBroker;
use rulebook_config::load_config;
use rulebook_engine::{LiveEngine, TradeLifecycleManager};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

use crate::cli::ReplayArgs;

pub async fn run(args: ReplayArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;

    let registry = super::load_registry(&config)?;
    let definition = registry
        .get(&args.strategy)
        .with_context(|| format!("Strategy '{}' not found", args.strategy))?;

    let (start, end) = super::parse_date_range(args.start.as_deref(), args.end.as_deref())?;
    let bars = super::load_bars(
        &args.data,
        &definition.symbol,
        definition.timeframe,
        start,
        end,
    )
    .await?;

    info!(
        strategy = %definition.id,
        bars = bars.len(),
        "replaying bars through the live path"
    );

    let lifecycle = TradeLifecycleManager::new(
        Arc::new(PaperBroker::new()),
        config.broker.paper,
        config.broker.default_qty,
    );
    let mut engine = LiveEngine::new(registry, lifecycle, config.engine.series_capacity);

    let symbol = definition.symbol.clone();
    for bar in &bars {
        engine.on_tick(&symbol, bar.close, bar.datetime()).await;
    }

    let history = engine.lifecycle().history();
    let total_pnl: f64 = history.iter().filter_map(|t| t.pnl).sum();

    println!("Replay complete");
    println!("═══════════════════════════════════════════════════════════");
    println!("  Bars Replayed:       {}", bars.len());
    println!("  Closed Trades:       {}", history.len());
    println!("  Total PnL:           {:.2}", total_pnl);
    for trade in engine.lifecycle().active_trades() {
        println!(
            "  Still open:          {} @ {:.2} (sl {:.2}, target {:.2})",
            trade.symbol, trade.entry_price, trade.sl_price, trade.target_price
        );
    }

    Ok(())
}
