//! Command implementations.

pub mod backtest;
pub mod replay;
pub mod runs;
pub mod strategies;
pub mod validate;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rulebook_config::AppConfig;
use rulebook_core::traits::DataSource;
use rulebook_core::types::{Bar, Timeframe};
use rulebook_data::CsvDataSource;
use rulebook_strategy::{DirStrategySource, StrategyRegistry};
use std::path::Path;
use std::sync::Arc;

/// Build the registry from the configured strategy directory and load
/// the current set.
fn load_registry(config: &AppConfig) -> Result<Arc<StrategyRegistry>> {
    registry_from_dir(Path::new(&config.strategies.dir))
}

fn registry_from_dir(dir: &Path) -> Result<Arc<StrategyRegistry>> {
    let source = DirStrategySource::new(dir);
    let registry = Arc::new(StrategyRegistry::new(Arc::new(source)));
    registry.reload().context("Failed to load strategies")?;
    Ok(registry)
}

/// Resolve optional YYYY-MM-DD bounds; unbounded ends cover all data.
fn parse_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let start = match start {
        Some(s) => parse_date(s)?,
        None => DateTime::from_timestamp(0, 0).unwrap(),
    };
    let end = match end {
        Some(s) => parse_date(s)? + chrono::Duration::days(1) - chrono::Duration::milliseconds(1),
        None => Utc::now(),
    };
    Ok((start, end))
}

fn parse_date(s: &str) -> Result<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}', expected YYYY-MM-DD", s))?;
    Ok(date.and_hms_opt(0, 0, 0).unwrap().and_utc())
}

async fn load_bars(
    data: &Path,
    symbol: &str,
    timeframe: Timeframe,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
) -> Result<Vec<Bar>> {
    let source = CsvDataSource::new(data)
        .with_context(|| format!("Data file '{}' not found", data.display()))?;
    let bars = source
        .fetch_history(symbol, timeframe, start, end)
        .await
        .context("Failed to load historical bars")?;
    Ok(bars)
}
