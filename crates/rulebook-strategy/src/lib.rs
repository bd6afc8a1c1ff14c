//! Strategy evaluation and registry.
//!
//! A strategy is a declarative JSON document: indicators plus entry
//! and exit condition trees. This crate evaluates those trees against
//! an [`rulebook_core::types::IndicatorFrame`] and keeps the active
//! strategy set in a reloadable registry.

pub mod evaluator;
pub mod registry;
pub mod source;

pub use evaluator::{evaluate, signals, signals_at, Signals};
pub use registry::StrategyRegistry;
pub use source::{DirStrategySource, StaticStrategySource, StrategySource, StrategyUnit};
