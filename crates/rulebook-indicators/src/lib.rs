//! Technical indicators for the rulebook trading engine.
//!
//! All indicators are pure functions over close prices and produce
//! columns index-aligned with the input bars (`None` during warm-up),
//! so backtest and live evaluation see identical values bar by bar.

mod calculator;
mod momentum;
mod moving_average;

pub use calculator::apply_indicators;
pub use momentum::Rsi;
pub use moving_average::{Ema, Sma};
