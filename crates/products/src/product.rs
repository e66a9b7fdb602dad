use serde::{Deserialize, Serialize};

use orderdesk_core::{DomainError, DomainResult, Entity, ProductId};

/// A stocked catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogProduct {
    pub id: ProductId,
    pub name: String,
    /// Price in smallest currency unit (e.g., cents).
    pub price: u64,
    /// Units available for sale. Never negative.
    pub quantity: i64,
}

impl CatalogProduct {
    /// Whether `requested` units can be taken from current stock.
    pub fn has_stock_for(&self, requested: i64) -> bool {
        requested <= self.quantity
    }

    /// Quantity left after taking `requested` units.
    ///
    /// Returns `None` when stock is insufficient.
    pub fn remaining_after(&self, requested: i64) -> Option<i64> {
        if self.has_stock_for(requested) {
            Some(self.quantity - requested)
        } else {
            None
        }
    }
}

impl Entity for CatalogProduct {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Catalog input for a new product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub price: u64,
    pub quantity: i64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, price: u64, quantity: i64) -> Self {
        Self {
            name: name.into(),
            price,
            quantity,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }
        if self.quantity < 0 {
            return Err(DomainError::validation("product quantity cannot be negative"));
        }
        Ok(())
    }

    pub fn into_product(self, id: ProductId) -> CatalogProduct {
        CatalogProduct {
            id,
            name: self.name.trim().to_string(),
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// New absolute stock level for one product.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockUpdate {
    pub id: ProductId,
    pub quantity: i64,
}

impl StockUpdate {
    pub fn new(id: ProductId, quantity: i64) -> Self {
        Self { id, quantity }
    }
}
