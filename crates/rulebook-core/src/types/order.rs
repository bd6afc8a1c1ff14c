//! Order types exchanged with a broker.

use serde::{Deserialize, Serialize};

/// Order side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// A market order request. The engine only dispatches market orders;
/// stop-loss and target handling stay inside the lifecycle manager.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub qty: f64,
    pub side: Side,
}

impl OrderRequest {
    pub fn market(symbol: impl Into<String>, qty: f64, side: Side) -> Self {
        Self {
            symbol: symbol.into(),
            qty,
            side,
        }
    }
}

/// Acknowledgement returned by a broker for an accepted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderAck {
    pub order_id: String,
}
