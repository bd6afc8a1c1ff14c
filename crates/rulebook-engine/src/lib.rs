//! Live engine: tick handling and trade lifecycle.

pub mod lifecycle;
pub mod live;

pub use lifecycle::TradeLifecycleManager;
pub use live::LiveEngine;
