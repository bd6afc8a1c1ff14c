//! Historical data source trait.

use crate::error::DataError;
use crate::types::{Bar, Timeframe};
use async_trait::async_trait;
use chrono::{DateTime, Utc};

/// Trait for historical data sources.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Fetch historical bars, ordered oldest to newest.
    async fn fetch_history(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the data source name.
    fn name(&self) -> &str;
}
