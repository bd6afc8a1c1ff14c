//! Trait seams to external collaborators.

mod broker;
mod data_source;
mod indicator;
mod run_store;

pub use broker::Broker;
pub use data_source::DataSource;
pub use indicator::Indicator;
pub use run_store::{RunRecord, RunStore, TradeRow};
