//! Broker trait definition.

use crate::error::BrokerError;
use crate::types::{OrderAck, OrderRequest};
use async_trait::async_trait;

/// Trait for broker integrations.
///
/// The engine treats order dispatch as an opaque call: a failure is
/// reported but never rolls back a local lifecycle transition.
#[async_trait]
pub trait Broker: Send + Sync {
    /// Submit a market order.
    async fn place_order(&self, request: OrderRequest) -> Result<OrderAck, BrokerError>;

    /// Get the broker name.
    fn name(&self) -> &str;
}
