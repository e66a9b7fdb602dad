use thiserror::Error;

use orderdesk_core::{ProductId, RepositoryError};

/// Failure of the order workflow. Every variant aborts the workflow.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OrderError {
    #[error("Invalid customer.")]
    InvalidCustomer,

    #[error("Some products are unavailable")]
    UnavailableProducts,

    #[error("You need to select at least one product.")]
    EmptyOrder,

    #[error("This order has invalid Products.")]
    InvalidLineItem,

    #[error("The product {name}, has only {available} available, but you request {requested}.")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    #[error("Something wrong on create a new order.")]
    PersistenceFailure,

    #[error("Requested quantity {quantity} for product {product_id} must be positive.")]
    InvalidQuantity { product_id: ProductId, quantity: i64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

impl OrderError {
    /// Stable machine-readable code for API responses and logs.
    pub fn code(&self) -> &'static str {
        match self {
            OrderError::InvalidCustomer => "invalid_customer",
            OrderError::UnavailableProducts => "unavailable_products",
            OrderError::EmptyOrder => "empty_order",
            OrderError::InvalidLineItem => "invalid_line_item",
            OrderError::InsufficientStock { .. } => "insufficient_stock",
            OrderError::PersistenceFailure => "persistence_failure",
            OrderError::InvalidQuantity { .. } => "invalid_quantity",
            OrderError::Repository(_) => "repository_error",
        }
    }
}
