use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use orderdesk_core::{ProductId, RepositoryError, RepositoryResult};
use orderdesk_products::{CatalogProduct, NewProduct, ProductRepository, StockUpdate};

use super::{map_sqlx_error, price_from_db, price_to_db};

#[derive(Debug, Clone)]
pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn product_from_row(row: &PgRow) -> RepositoryResult<CatalogProduct> {
    let decode = |e| map_sqlx_error("decode_product", e);
    Ok(CatalogProduct {
        id: ProductId::from_uuid(row.try_get::<Uuid, _>("id").map_err(decode)?),
        name: row.try_get("name").map_err(decode)?,
        price: price_from_db(row.try_get("price").map_err(decode)?)?,
        quantity: row.try_get("quantity").map_err(decode)?,
    })
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    #[instrument(skip(self, ids), fields(requested = ids.len()), err)]
    async fn find_all_by_id(&self, ids: &[ProductId]) -> RepositoryResult<Vec<CatalogProduct>> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows = sqlx::query(
            r#"
            SELECT id, name, price, quantity
            FROM products
            WHERE id = ANY($1)
            ORDER BY array_position($1, id)
            "#,
        )
        .bind(&uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_products", e))?;

        rows.iter().map(product_from_row).collect()
    }

    #[instrument(skip(self), fields(product_id = %id), err)]
    async fn find_by_id(&self, id: ProductId) -> RepositoryResult<Option<CatalogProduct>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, price, quantity
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_product", e))?;

        row.as_ref().map(product_from_row).transpose()
    }

    /// Applies every update in one transaction; an unknown id rolls back the batch.
    #[instrument(skip(self, updates), fields(updates = updates.len()), err)]
    async fn update_quantities(&self, updates: &[StockUpdate]) -> RepositoryResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_update_quantities", e))?;

        for update in updates {
            let result = sqlx::query(
                r#"
                UPDATE products
                SET quantity = $2, updated_at = NOW()
                WHERE id = $1
                "#,
            )
            .bind(*update.id.as_uuid())
            .bind(update.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("update_quantity", e))?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::not_found(format!("product {}", update.id)));
            }
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_update_quantities", e))
    }

    #[instrument(skip(self, product), err)]
    async fn create(&self, product: NewProduct) -> RepositoryResult<CatalogProduct> {
        let product = product.into_product(ProductId::new());

        sqlx::query(
            r#"
            INSERT INTO products (id, name, price, quantity)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(*product.id.as_uuid())
        .bind(&product.name)
        .bind(price_to_db(product.price)?)
        .bind(product.quantity)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_product", e))?;

        Ok(product)
    }
}
