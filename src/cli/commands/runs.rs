//! Persisted run inspection commands.

use anyhow::{Context, Result};
use rulebook_config::load_config;
use rulebook_core::traits::RunStore;
use rulebook_store::{trades_to_csv, JsonRunStore};
use std::path::Path;

use crate::cli::RunsAction;

pub async fn run(action: RunsAction, config_path: &Path) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    let store = JsonRunStore::open(&config.storage.path, config.storage.max_runs)?;

    match action {
        RunsAction::List => {
            let runs = store.list_runs().await?;
            if runs.is_empty() {
                println!("No persisted runs.");
                return Ok(());
            }
            println!(
                "{:>5}  {:<24} {:<16} {:>8} {:>9} {:>7}  {}",
                "id", "strategy", "symbol", "trades", "win rate", "pnl", "timestamp"
            );
            for run in runs {
                println!(
                    "{:>5}  {:<24} {:<16} {:>8} {:>8.2}% {:>7.2}  {}",
                    run.id,
                    run.strategy_name,
                    run.symbol,
                    run.total_trades,
                    run.win_rate,
                    run.total_pnl,
                    run.timestamp.format("%Y-%m-%d %H:%M:%S"),
                );
            }
        }
        RunsAction::Export { id, format, output } => {
            let rows = store.export_trades(id).await?;
            let rendered = match format.as_str() {
                "json" => serde_json::to_string_pretty(&rows)?,
                _ => trades_to_csv(&rows)?,
            };
            match output {
                Some(path) => {
                    std::fs::write(&path, rendered)?;
                    println!("Exported {} trades to {:?}", rows.len(), path);
                }
                None => print!("{}", rendered),
            }
        }
        RunsAction::Delete { ids } => {
            store.delete_runs(&ids).await?;
            println!("Deleted runs: {:?}", ids);
        }
    }

    Ok(())
}
