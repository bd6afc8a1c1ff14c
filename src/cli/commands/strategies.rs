//! List strategies command.

use anyhow::{Context, Result};
use rulebook_config::load_config;
use std::path::{Path, PathBuf};

pub async fn run(dir: Option<PathBuf>, config_path: &Path) -> Result<()> {
    let config = load_config(config_path).context("Failed to load configuration")?;
    let dir = dir.unwrap_or_else(|| PathBuf::from(&config.strategies.dir));
    let registry = super::registry_from_dir(&dir)?;

    let strategies = registry.strategies();

    println!("Loaded Strategies ({})", strategies.len());
    println!("═══════════════════════════════════════════════════════════");
    println!();

    if strategies.is_empty() {
        println!("  No strategy files found in '{}'.", dir.display());
        return Ok(());
    }

    for def in strategies.iter() {
        println!("  {}", def.id);
        println!("  ───────────────────────────────────────────────────────");
        println!("  Name:       {}", def.name);
        println!("  Symbol:     {}", def.symbol);
        println!("  Timeframe:  {}", def.timeframe);
        println!(
            "  Indicators: {}",
            def.indicators
                .iter()
                .map(|i| format!("{} ({} {})", i.id, i.kind, i.params.period))
                .collect::<Vec<_>>()
                .join(", ")
        );
        println!(
            "  Risk:       sl {}% / target {}%",
            def.risk_management.stop_loss_perc, def.risk_management.target_perc
        );
        println!();
    }

    println!("Use backtest --strategy <id> to run one.");

    Ok(())
}
