use async_trait::async_trait;

use orderdesk_core::{ProductId, RepositoryResult};

use crate::product::{CatalogProduct, NewProduct, StockUpdate};

/// Catalog lookup and stock mutation contract.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Batch lookup. Returns only the products that exist; a result shorter
    /// than the distinct ids requested signals unknown ids.
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepositoryResult<Vec<CatalogProduct>>;

    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<CatalogProduct>>;

    /// Overwrite the available quantity of each listed product.
    async fn update_quantities(&self, updates: &[StockUpdate]) -> RepositoryResult<()>;

    /// Add a product to the catalog. Duplicate names fail with
    /// `RepositoryError::Conflict`.
    async fn create(&self, product: NewProduct) -> RepositoryResult<CatalogProduct>;
}
