use async_trait::async_trait;

use orderdesk_core::{CustomerId, RepositoryResult};

use crate::customer::{Customer, NewCustomer};

/// Customer lookup and registration contract.
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Returns `None` when no customer has this id.
    async fn find_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>>;

    /// Register a customer. Implementations reject duplicate emails with
    /// `RepositoryError::Conflict`.
    async fn create(&self, customer: NewCustomer) -> RepositoryResult<Customer>;
}
