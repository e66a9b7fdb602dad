use async_trait::async_trait;

use orderdesk_core::{OrderId, RepositoryResult};
use orderdesk_customers::Customer;

use crate::order::{Order, OrderLineItem};

/// Order persistence contract.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a new order for `customer`.
    ///
    /// `Ok(None)` means the store accepted the call but produced no record.
    async fn create(
        &self,
        customer: &Customer,
        line_items: Vec<OrderLineItem>,
    ) -> RepositoryResult<Option<Order>>;

    async fn find_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>>;
}
