//! Backtest command implementation.

use anyhow::{Context, Result};
use rulebook_backtest::BacktestSimulator;
use rulebook_config::load_config;
use rulebook_core::traits::RunStore;
use rulebook_core::types::OverrideMap;
use rulebook_store::JsonRunStore;
use std::path::Path;
use tracing::info;

use crate::cli::BacktestArgs;

pub async fn run(args: BacktestArgs, config_path: &Path) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;

    info!("Starting backtest for strategy: {}", args.strategy);

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

    let overrides: OverrideMap = match &args.overrides {
        Some(json) => serde_json::from_str(json).context("Invalid overrides JSON")?,
        None => OverrideMap::new(),
    };

    let mut result = BacktestSimulator::run(&definition, &bars, &overrides)
        .context("Strategy is invalid with the given overrides")?;

    // Persist first so the printed summary carries the assigned id.
    // Zeroed results from an unsimulatable series are not stored.
    if !args.no_save && result.bars_processed > 0 {
        let store = JsonRunStore::open(&config.storage.path, config.storage.max_runs)?;
        let run_id = store.save_run(result.to_record(), &result.trades).await?;
        result.run_id = Some(run_id);
        info!(run_id, "run persisted");
    }

    match args.output.as_str() {
        "json" => println!("{}", result.to_json()?),
        _ => println!("{}", result.summary()),
    }

    if let Some(save_path) = &args.save {
        std::fs::write(save_path, result.to_json()?)?;
        info!("Results saved to {:?}", save_path);
    }

    Ok(())
}
