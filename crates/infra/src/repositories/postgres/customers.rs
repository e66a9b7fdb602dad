use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Row};
use tracing::instrument;
use uuid::Uuid;

use orderdesk_core::{CustomerId, RepositoryResult};
use orderdesk_customers::{Customer, CustomerRepository, NewCustomer};

use super::map_sqlx_error;

#[derive(Debug, Clone)]
pub struct PostgresCustomerRepository {
    pool: PgPool,
}

impl PostgresCustomerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CustomerRepository for PostgresCustomerRepository {
    #[instrument(skip(self), fields(customer_id = %id), err)]
    async fn find_by_id(&self, id: CustomerId) -> RepositoryResult<Option<Customer>> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, created_at
            FROM customers
            WHERE id = $1
            "#,
        )
        .bind(*id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("find_customer", e))?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(Customer {
            id: CustomerId::from_uuid(row.try_get::<Uuid, _>("id").map_err(|e| map_sqlx_error("find_customer", e))?),
            name: row.try_get("name").map_err(|e| map_sqlx_error("find_customer", e))?,
            email: row.try_get("email").map_err(|e| map_sqlx_error("find_customer", e))?,
            created_at: row
                .try_get::<DateTime<Utc>, _>("created_at")
                .map_err(|e| map_sqlx_error("find_customer", e))?,
        }))
    }

    #[instrument(skip(self, customer), err)]
    async fn create(&self, customer: NewCustomer) -> RepositoryResult<Customer> {
        let customer = customer.into_customer(CustomerId::new(), Utc::now());

        sqlx::query(
            r#"
            INSERT INTO customers (id, name, email, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(*customer.id.as_uuid())
        .bind(&customer.name)
        .bind(&customer.email)
        .bind(customer.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_sqlx_error("create_customer", e))?;

        Ok(customer)
    }
}
