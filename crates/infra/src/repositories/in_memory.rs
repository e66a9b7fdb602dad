//! In-memory repositories for tests/dev.

use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::Utc;

use orderdesk_core::{CustomerId, OrderId, ProductId, RepositoryError, RepositoryResult};
use orderdesk_customers::{Customer, CustomerRepository, NewCustomer};
use orderdesk_products::{CatalogProduct, NewProduct, ProductRepository, StockUpdate};
use orderdesk_sales::{Order, OrderLineItem, OrderRepository};

fn read<T>(lock: &RwLock<T>) -> RepositoryResult<RwLockReadGuard<'_, T>> {
    lock.read()
        .map_err(|_| RepositoryError::unavailable("in-memory store lock poisoned"))
}

fn write<T>(lock: &RwLock<T>) -> RepositoryResult<RwLockWriteGuard<'_, T>> {
    lock.write()
        .map_err(|_| RepositoryError::unavailable("in-memory store lock poisoned"))
}

#[derive(Debug, Default)]
pub struct InMemoryCustomerRepository {
    inner: RwLock<HashMap<CustomerId, Customer>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn find_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        Ok(read(&self.inner)?.get(&id).cloned())
    }

    async fn create(&self, customer: NewCustomer) -> RepositoryResult<Customer> {
        let customer = customer.into_customer(CustomerId::new(), Utc::now());
        let mut map = write(&self.inner)?;

        if map.values().any(|c| c.email == customer.email) {
            return Err(RepositoryError::conflict(format!(
                "customer email already registered: {}",
                customer.email
            )));
        }

        map.insert(customer.id, customer.clone());
        Ok(customer)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    inner: RwLock<HashMap<ProductId, CatalogProduct>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepositoryResult<Vec<CatalogProduct>> {
        let map = read(&self.inner)?;
        Ok(ids.iter().filter_map(|id| map.get(id).cloned()).collect())
    }

    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<CatalogProduct>> {
        Ok(read(&self.inner)?.get(&id).cloned())
    }

    async fn update_quantities(&self, updates: &[StockUpdate]) -> RepositoryResult<()> {
        let mut map = write(&self.inner)?;

        // All-or-nothing: check every target before touching any of them.
        if let Some(missing) = updates.iter().find(|u| !map.contains_key(&u.id)) {
            return Err(RepositoryError::not_found(format!("product {}", missing.id)));
        }

        for update in updates {
            if let Some(product) = map.get_mut(&update.id) {
                product.quantity = update.quantity;
            }
        }
        Ok(())
    }

    async fn create(&self, product: NewProduct) -> RepositoryResult<CatalogProduct> {
        let product = product.into_product(ProductId::new());
        let key = product.name.to_lowercase();
        let mut map = write(&self.inner)?;

        // Same rule as the Postgres `lower(name)` unique index.
        if map.values().any(|p| p.name.to_lowercase() == key) {
            return Err(RepositoryError::conflict(format!(
                "product name already exists: {}",
                product.name
            )));
        }

        map.insert(product.id, product.clone());
        Ok(product)
    }
}

#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    inner: RwLock<HashMap<OrderId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn create(
        &self,
        customer: &Customer,
        line_items: Vec<OrderLineItem>,
    ) -> RepositoryResult<Option<Order>> {
        let order = Order {
            id: OrderId::new(),
            customer_id: customer.id,
            line_items,
            created_at: Utc::now(),
        };
        write(&self.inner)?.insert(order.id, order.clone());
        Ok(Some(order))
    }

    async fn find_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>> {
        Ok(read(&self.inner)?.get(&id).cloned())
    }
}
