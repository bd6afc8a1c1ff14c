//! Error types for the trading engine.

use thiserror::Error;

/// Top-level engine error.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Strategy error: {0}")]
    Strategy(#[from] StrategyError),

    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),

    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Strategy definition and evaluation errors.
#[derive(Error, Debug)]
pub enum StrategyError {
    #[error("Invalid definition: {0}")]
    InvalidDefinition(String),

    #[error("Malformed strategy '{unit}': {reason}")]
    Malformed { unit: String, reason: String },

    #[error("Strategy not found: {0}")]
    NotFound(String),

    #[error("Strategy source error: {0}")]
    Source(String),
}

/// Broker-side errors.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Order rejected: {0}")]
    OrderRejected(String),

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("API error: {0}")]
    ApiError(String),
}

/// Data source errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for the requested range")]
    NoDataAvailable,

    #[error("Invalid timeframe: {0}")]
    InvalidTimeframe(String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Unknown indicator type: {0}")]
    UnknownType(String),
}

/// Run store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Run not found: {0}")]
    RunNotFound(u64),

    #[error("Storage IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
