use serde::Deserialize;
use serde_json::{json, Value};

use orderdesk_core::{CustomerId, DomainError, ProductId};
use orderdesk_customers::Customer;
use orderdesk_products::CatalogProduct;
use orderdesk_sales::{Order, OrderRequest, RequestedItem};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct RegisterCustomerRequest {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    pub name: String,
    /// Smallest currency unit (e.g., cents).
    pub price: u64,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct OrderProductRequest {
    pub id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub customer_id: String,
    pub products: Vec<OrderProductRequest>,
}

impl CreateOrderRequest {
    /// Parse the string ids into the workflow input.
    pub fn into_order_request(self) -> Result<OrderRequest, DomainError> {
        let customer_id: CustomerId = self.customer_id.parse()?;
        let items = self
            .products
            .into_iter()
            .map(|p| -> Result<RequestedItem, DomainError> {
                Ok(RequestedItem::new(p.id.parse::<ProductId>()?, p.quantity))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(OrderRequest::new(customer_id, items))
    }
}

// -------------------------
// Response mapping
// -------------------------

pub fn customer_to_json(customer: &Customer) -> Value {
    json!({
        "id": customer.id.to_string(),
        "name": customer.name,
        "email": customer.email,
        "created_at": customer.created_at.to_rfc3339(),
    })
}

pub fn product_to_json(product: &CatalogProduct) -> Value {
    json!({
        "id": product.id.to_string(),
        "name": product.name,
        "price": product.price,
        "quantity": product.quantity,
    })
}

pub fn order_to_json(order: &Order) -> Value {
    json!({
        "id": order.id.to_string(),
        "customer_id": order.customer_id.to_string(),
        "created_at": order.created_at.to_rfc3339(),
        "products": order
            .line_items
            .iter()
            .map(|line| json!({
                "product_id": line.product_id.to_string(),
                "price": line.unit_price,
                "quantity": line.quantity,
            }))
            .collect::<Vec<_>>(),
    })
}
