//! Core data types.

mod bar;
mod frame;
mod order;
mod strategy;
mod timeframe;
mod trade;

pub use bar::{Bar, BarSeries};
pub use frame::IndicatorFrame;
pub use order::{OrderAck, OrderRequest, Side};
pub use strategy::{
    ConditionNode, IndicatorKind, IndicatorParams, IndicatorParamsPatch, IndicatorSpec, Operand,
    Operator, OverrideMap, RiskParams, StrategyDefinition,
};
pub use timeframe::Timeframe;
pub use trade::{ExitReason, Trade, TradeStatus};
