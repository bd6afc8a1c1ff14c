//! Core types and traits for the rulebook trading engine.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, BarSeries, IndicatorFrame)
//! - The declarative strategy model (indicators, condition trees, risk)
//! - Trade lifecycle types
//! - Trait seams for brokers, data sources, indicators, and run storage

pub mod error;
pub mod traits;
pub mod types;

pub use error::{EngineError, EngineResult};
pub use traits::*;
pub use types::*;
