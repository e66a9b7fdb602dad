//! Repository implementations behind the domain contracts.
//!
//! - `in_memory`: lock-guarded maps for tests/dev
//! - `postgres`: sqlx-backed tables for production

use std::sync::Arc;

use orderdesk_customers::CustomerRepository;
use orderdesk_products::ProductRepository;
use orderdesk_sales::{CreateOrderWorkflow, OrderRepository};

pub mod in_memory;
pub mod postgres;

pub use in_memory::{InMemoryCustomerRepository, InMemoryOrderRepository, InMemoryProductRepository};
pub use postgres::{PostgresCustomerRepository, PostgresOrderRepository, PostgresProductRepository};

/// The three repositories a running service needs, type-erased.
#[derive(Clone)]
pub struct Repositories {
    pub customers: Arc<dyn CustomerRepository>,
    pub products: Arc<dyn ProductRepository>,
    pub orders: Arc<dyn OrderRepository>,
}

impl Repositories {
    pub fn in_memory() -> Self {
        Self {
            customers: Arc::new(InMemoryCustomerRepository::new()),
            products: Arc::new(InMemoryProductRepository::new()),
            orders: Arc::new(InMemoryOrderRepository::new()),
        }
    }

    pub fn postgres(pool: sqlx::PgPool) -> Self {
        Self {
            customers: Arc::new(PostgresCustomerRepository::new(pool.clone())),
            products: Arc::new(PostgresProductRepository::new(pool.clone())),
            orders: Arc::new(PostgresOrderRepository::new(pool)),
        }
    }

    /// Order workflow wired to these repositories.
    pub fn order_workflow(&self) -> CreateOrderWorkflow {
        CreateOrderWorkflow::new(self.orders.clone(), self.products.clone(), self.customers.clone())
    }
}
