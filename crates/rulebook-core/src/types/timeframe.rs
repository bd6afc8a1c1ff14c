//! Bar timeframe definitions.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timeframe for bars/candles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Timeframe {
    /// 1 minute bars
    #[serde(rename = "1m", alias = "1")]
    Minute1,
    /// 5 minute bars
    #[serde(rename = "5m", alias = "5")]
    #[default]
    Minute5,
    /// 15 minute bars
    #[serde(rename = "15m", alias = "15")]
    Minute15,
    /// 1 hour bars
    #[serde(rename = "1h", alias = "60")]
    Hour1,
    /// Daily bars
    #[serde(rename = "1d", alias = "D")]
    Daily,
}

impl Timeframe {
    /// Duration of the timeframe in seconds.
    pub fn as_secs(&self) -> u64 {
        match self {
            Timeframe::Minute1 => 60,
            Timeframe::Minute5 => 300,
            Timeframe::Minute15 => 900,
            Timeframe::Hour1 => 3600,
            Timeframe::Daily => 86400,
        }
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Timeframe::Minute1 => "1m",
            Timeframe::Minute5 => "5m",
            Timeframe::Minute15 => "15m",
            Timeframe::Hour1 => "1h",
            Timeframe::Daily => "1d",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accepts both the CLI spellings and broker resolution codes.
        match s {
            "1m" | "1min" | "1" => Ok(Timeframe::Minute1),
            "5m" | "5min" | "5" => Ok(Timeframe::Minute5),
            "15m" | "15min" | "15" => Ok(Timeframe::Minute15),
            "1h" | "60" => Ok(Timeframe::Hour1),
            "1d" | "D" | "day" | "daily" => Ok(Timeframe::Daily),
            _ => Err(format!("Invalid timeframe: {}", s)),
        }
    }
}
