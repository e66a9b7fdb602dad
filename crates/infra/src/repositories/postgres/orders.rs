use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use orderdesk_core::{CustomerId, OrderId, ProductId, RepositoryError, RepositoryResult};
use orderdesk_customers::Customer;
use orderdesk_sales::{Order, OrderLineItem, OrderRepository};

use super::{map_sqlx_error, price_from_db, price_to_db};

/// Orders live in `orders`; their lines in `orders_products`, numbered from 1
/// in the order they were produced.
#[derive(Debug, Clone)]
pub struct PostgresOrderRepository {
    pool: PgPool,
}

impl PostgresOrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderRepository {
    /// Inserts the order row and all line rows in one transaction.
    #[instrument(skip(self, customer, line_items), fields(customer_id = %customer.id, lines = line_items.len()), err)]
    async fn create(
        &self,
        customer: &Customer,
        line_items: Vec<OrderLineItem>,
    ) -> RepositoryResult<Option<Order>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| map_sqlx_error("begin_create_order", e))?;

        let row = sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id)
            VALUES ($1, $2)
            RETURNING id, created_at
            "#,
        )
        .bind(*OrderId::new().as_uuid())
        .bind(*customer.id.as_uuid())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_sqlx_error("create_order", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let id = OrderId::from_uuid(
            row.try_get::<Uuid, _>("id")
                .map_err(|e| map_sqlx_error("create_order", e))?,
        );
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| map_sqlx_error("create_order", e))?;

        for (idx, line) in line_items.iter().enumerate() {
            let line_no = i32::try_from(idx + 1)
                .map_err(|_| RepositoryError::conflict("too many order lines"))?;

            sqlx::query(
                r#"
                INSERT INTO orders_products (order_id, line_no, product_id, price, quantity)
                VALUES ($1, $2, $3, $4, $5)
                "#,
            )
            .bind(*id.as_uuid())
            .bind(line_no)
            .bind(*line.product_id.as_uuid())
            .bind(price_to_db(line.unit_price)?)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await
            .map_err(|e| map_sqlx_error("create_order_line", e))?;
        }

        tx.commit()
            .await
            .map_err(|e| map_sqlx_error("commit_create_order", e))?;

        Ok(Some(Order {
            id,
            customer_id: customer.id,
            line_items,
            created_at,
        }))
    }

    #[instrument(skip(self), fields(order_id = %id), err)]
    async fn find_by_id(&self, id: OrderId) -> RepositoryResult<Option<Order>> {
        let row = sqlx::query(
            r#"
            SELECT id, customer_id, created_at
            FROM orders
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_order", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let customer_id = CustomerId::from_uuid(
            row.try_get::<Uuid, _>("customer_id")
                .map_err(|e| map_sqlx_error("find_order", e))?,
        );
        let created_at: DateTime<Utc> = row
            .try_get("created_at")
            .map_err(|e| map_sqlx_error("find_order", e))?;

        let lines = sqlx::query(
            r#"
            SELECT product_id, price, quantity
            FROM orders_products
            WHERE order_id = $1
            ORDER BY line_no ASC
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_order_lines", e))?;

        let mut line_items = Vec::with_capacity(lines.len());
        for line in &lines {
            let decode = |e| map_sqlx_error("decode_order_line", e);
            line_items.push(OrderLineItem {
                product_id: ProductId::from_uuid(line.try_get::<Uuid, _>("product_id").map_err(decode)?),
                unit_price: price_from_db(line.try_get("price").map_err(decode)?)?,
                quantity: line.try_get("quantity").map_err(decode)?,
            });
        }

        Ok(Some(Order {
            id,
            customer_id,
            line_items,
            created_at,
        }))
    }
}
