//! Paper broker: accepts every order and records it, no exchange.

use async_trait::async_trait;
use rulebook_core::error::BrokerError;
use rulebook_core::traits::Broker;
use rulebook_core::types::{OrderAck, OrderRequest};
use std::sync::{Arc, Mutex};
use tracing::info;
use uuid::Uuid;

/// In-memory broker for paper trading and tests. Every order is
/// acknowledged immediately with a fresh order id.
#[derive(Default)]
pub struct PaperBroker {
    orders: Arc<Mutex<Vec<OrderRequest>>>,
}

impl PaperBroker {
    pub fn new() -> Self {
        Self::default()
    }

    /// All orders placed so far, in submission order.
    pub fn recorded_orders(&self) -> Vec<OrderRequest> {
        self.orders.lock().unwrap().clone()
    }
}

#[async_trait]
impl Broker for PaperBroker {
    async fn place_order(&self, request: OrderRequest) -> Result<OrderAck, BrokerError> {
        let order_id = Uuid::new_v4().to_string();
        info!(
            symbol = %request.symbol,
            side = ?request.side,
            qty = request.qty,
            order_id = %order_id,
            "paper order filled"
        );
        self.orders.lock().unwrap().push(request);
        Ok(OrderAck { order_id })
    }

    fn name(&self) -> &str {
        "Paper Broker"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_core::types::Side;

    #[tokio::test]
    async fn test_orders_are_acked_and_recorded() {
        let broker = PaperBroker::new();

        let buy = broker
            .place_order(OrderRequest::market("NSE:SBIN-EQ", 1.0, Side::Buy))
            .await
            .unwrap();
        let sell = broker
            .place_order(OrderRequest::market("NSE:SBIN-EQ", 1.0, Side::Sell))
            .await
            .unwrap();

        assert_ne!(buy.order_id, sell.order_id);

        let recorded = broker.recorded_orders();
        assert_eq!(recorded.len(), 2);
        assert_eq!(recorded[0].side, Side::Buy);
        assert_eq!(recorded[1].side, Side::Sell);
    }
}
