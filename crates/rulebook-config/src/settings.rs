//! Configuration structures.

use serde::{Deserialize, Serialize};

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub app: AppSettings,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub broker: BrokerSettings,
    #[serde(default)]
    pub engine: EngineSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub strategies: StrategySettings,
}

/// General app settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub environment: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: "rulebook".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
            file: None,
        }
    }
}

/// Broker settings. With `paper` set no orders leave the process.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrokerSettings {
    pub paper: bool,
    pub default_qty: f64,
}

impl Default for BrokerSettings {
    fn default() -> Self {
        Self {
            paper: true,
            default_qty: 1.0,
        }
    }
}

/// Live engine settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Bars retained per symbol in the live window.
    pub series_capacity: usize,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            series_capacity: 100,
        }
    }
}

/// Run storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageSettings {
    pub path: String,
    /// Most recent runs kept; older runs are evicted on save.
    pub max_runs: usize,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            path: "data/runs.json".to_string(),
            max_runs: 100,
        }
    }
}

/// Strategy loading settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategySettings {
    pub dir: String,
}

impl Default for StrategySettings {
    fn default() -> Self {
        Self {
            dir: "strategies".to_string(),
        }
    }
}
