//! Idempotent schema bootstrap, run once at startup.

use sqlx::PgPool;
use tracing::{debug, instrument};

use orderdesk_core::RepositoryError;

use super::map_sqlx_error;

const STATEMENTS: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS customers (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        email       TEXT NOT NULL UNIQUE,
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS products (
        id          UUID PRIMARY KEY,
        name        TEXT NOT NULL,
        price       BIGINT NOT NULL CHECK (price >= 0),
        quantity    BIGINT NOT NULL CHECK (quantity >= 0),
        created_at  TIMESTAMPTZ NOT NULL DEFAULT NOW(),
        updated_at  TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    // Product names are unique regardless of case.
    r#"
    CREATE UNIQUE INDEX IF NOT EXISTS products_name_lower_key ON products (lower(name))
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders (
        id           UUID PRIMARY KEY,
        customer_id  UUID NOT NULL REFERENCES customers (id),
        created_at   TIMESTAMPTZ NOT NULL DEFAULT NOW()
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS orders_products (
        order_id    UUID NOT NULL REFERENCES orders (id) ON DELETE CASCADE,
        line_no     INTEGER NOT NULL,
        product_id  UUID NOT NULL REFERENCES products (id),
        price       BIGINT NOT NULL,
        quantity    BIGINT NOT NULL CHECK (quantity > 0),
        PRIMARY KEY (order_id, line_no)
    )
    "#,
];

#[instrument(skip(pool), err)]
pub async fn ensure_schema(pool: &PgPool) -> Result<(), RepositoryError> {
    for statement in STATEMENTS {
        sqlx::query(*statement)
            .execute(pool)
            .await
            .map_err(|e| map_sqlx_error("ensure_schema", e))?;
    }
    debug!(tables = STATEMENTS.len(), "schema ready");
    Ok(())
}
