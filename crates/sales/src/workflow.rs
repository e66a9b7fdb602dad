//! Order creation workflow.
//!
//! A linear sequence of validation gates followed by two side effects:
//!
//! 1. quantities are positive; repeated product ids are merged
//! 2. the customer exists
//! 3. every requested product exists in the catalog
//! 4. the order is not empty
//! 5. every line fits in current stock
//! 6. stock is decremented (one batch update)
//! 7. the order is persisted
//!
//! Any failure before step 6 leaves the catalog untouched. If step 7 fails the
//! pre-order quantities are written back before the error is returned.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use orderdesk_customers::CustomerRepository;
use orderdesk_products::{CatalogProduct, ProductRepository, StockUpdate};

use crate::error::OrderError;
use crate::order::{Order, OrderLineItem, OrderRequest, RequestedItem};
use crate::repository::OrderRepository;

/// Creates orders against injected customer, catalog and order repositories.
///
/// Stateless apart from its collaborators; share one instance behind an `Arc`.
#[derive(Clone)]
pub struct CreateOrderWorkflow {
    orders: Arc<dyn OrderRepository>,
    products: Arc<dyn ProductRepository>,
    customers: Arc<dyn CustomerRepository>,
}

/// Everything staged by the validation pass, applied only once all lines pass.
#[derive(Debug, Default)]
struct StockPlan {
    updates: Vec<StockUpdate>,
    restores: Vec<StockUpdate>,
    line_items: Vec<OrderLineItem>,
}

impl CreateOrderWorkflow {
    pub fn new(
        orders: Arc<dyn OrderRepository>,
        products: Arc<dyn ProductRepository>,
        customers: Arc<dyn CustomerRepository>,
    ) -> Self {
        Self {
            orders,
            products,
            customers,
        }
    }

    #[instrument(
        skip(self, request),
        fields(customer_id = %request.customer_id, requested_lines = request.items.len()),
        err
    )]
    pub async fn execute(&self, request: OrderRequest) -> Result<Order, OrderError> {
        let requested = consolidate(&request.items)?;

        let customer = self
            .customers
            .find_by_id(request.customer_id)
            .await?
            .ok_or(OrderError::InvalidCustomer)?;

        let ids: Vec<_> = requested.iter().map(|item| item.product_id).collect();
        let catalog = self.products.find_all_by_id(&ids).await?;

        if catalog.len() < ids.len() {
            warn!(requested = ids.len(), matched = catalog.len(), "order references unknown products");
            return Err(OrderError::UnavailableProducts);
        }

        if catalog.is_empty() {
            return Err(OrderError::EmptyOrder);
        }

        let plan = plan_stock(&catalog, &requested)?;
        debug!(lines = plan.line_items.len(), "order validated; applying stock updates");

        self.products.update_quantities(&plan.updates).await?;

        match self.orders.create(&customer, plan.line_items).await {
            Ok(Some(order)) => {
                debug!(order_id = %order.id, "order persisted");
                Ok(order)
            }
            Ok(None) => {
                self.restore_stock(&plan.restores).await;
                Err(OrderError::PersistenceFailure)
            }
            Err(e) => {
                self.restore_stock(&plan.restores).await;
                Err(e.into())
            }
        }
    }

    async fn restore_stock(&self, restores: &[StockUpdate]) {
        match self.products.update_quantities(restores).await {
            Ok(()) => warn!(products = restores.len(), "order not persisted; stock restored"),
            Err(e) => error!(
                error = %e,
                products = restores.len(),
                "order not persisted and stock restore failed"
            ),
        }
    }
}

/// Reject non-positive quantities and merge repeated product ids, keeping the
/// order in which each product first appears.
fn consolidate(items: &[RequestedItem]) -> Result<Vec<RequestedItem>, OrderError> {
    let mut merged: Vec<RequestedItem> = Vec::with_capacity(items.len());

    for item in items {
        if item.quantity <= 0 {
            return Err(OrderError::InvalidQuantity {
                product_id: item.product_id,
                quantity: item.quantity,
            });
        }

        match merged.iter_mut().find(|m| m.product_id == item.product_id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => merged.push(*item),
        }
    }

    Ok(merged)
}

/// Validate every catalog match against its request and stage the resulting
/// stock levels and line items. Pure: nothing is written here.
fn plan_stock(
    catalog: &[CatalogProduct],
    requested: &[RequestedItem],
) -> Result<StockPlan, OrderError> {
    let mut plan = StockPlan::default();

    for product in catalog {
        let item = requested
            .iter()
            .find(|r| r.product_id == product.id)
            .ok_or(OrderError::InvalidLineItem)?;

        let remaining =
            product
                .remaining_after(item.quantity)
                .ok_or_else(|| OrderError::InsufficientStock {
                    name: product.name.clone(),
                    available: product.quantity,
                    requested: item.quantity,
                })?;

        plan.updates.push(StockUpdate::new(product.id, remaining));
        plan.restores.push(StockUpdate::new(product.id, product.quantity));
        plan.line_items.push(OrderLineItem {
            product_id: product.id,
            unit_price: product.price,
            quantity: item.quantity,
        });
    }

    Ok(plan)
}
