//! Backtest simulation over historical bars.

mod result;
mod simulator;

pub use result::BacktestResult;
pub use simulator::BacktestSimulator;
