//! Postgres-backed repositories.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `RepositoryError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | RepositoryError |
//! |------------|----------------------|-----------------|
//! | Database (unique violation) | `23505` | `Conflict` |
//! | Database (check constraint violation) | `23514` | `Conflict` |
//! | ColumnDecode / Decode | N/A | `Corrupt` |
//! | Anything else | Any other | `Unavailable` |
//!
//! ## Thread Safety
//!
//! Every repository wraps a cloned `PgPool`, which is `Send + Sync` and shares
//! one underlying connection pool.

use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::instrument;

use orderdesk_core::RepositoryError;

pub mod customers;
pub mod orders;
pub mod products;
pub mod schema;

pub use customers::PostgresCustomerRepository;
pub use orders::PostgresOrderRepository;
pub use products::PostgresProductRepository;

/// Open a connection pool and make sure the schema exists.
#[instrument(skip(database_url), err)]
pub async fn connect(database_url: &str, max_connections: u32) -> Result<PgPool, RepositoryError> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
        .map_err(|e| map_sqlx_error("connect", e))?;

    schema::ensure_schema(&pool).await?;
    Ok(pool)
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    match &err {
        sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
            Some("23505") | Some("23514") => {
                RepositoryError::conflict(format!("{operation}: {}", db_err.message()))
            }
            _ => RepositoryError::unavailable(format!("{operation}: {err}")),
        },
        sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
            RepositoryError::corrupt(format!("{operation}: {err}"))
        }
        _ => RepositoryError::unavailable(format!("{operation}: {err}")),
    }
}

/// Money and stock columns are BIGINT; prices are unsigned in the domain.
pub(crate) fn price_to_db(price: u64) -> Result<i64, RepositoryError> {
    i64::try_from(price).map_err(|_| RepositoryError::conflict(format!("price {price} exceeds storage range")))
}

pub(crate) fn price_from_db(price: i64) -> Result<u64, RepositoryError> {
    u64::try_from(price).map_err(|_| RepositoryError::corrupt(format!("negative stored price {price}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_conversion_rejects_out_of_range_values() {
        assert_eq!(price_to_db(1000), Ok(1000));
        assert!(matches!(price_to_db(u64::MAX), Err(RepositoryError::Conflict(_))));
        assert_eq!(price_from_db(1000), Ok(1000));
        assert!(matches!(price_from_db(-1), Err(RepositoryError::Corrupt(_))));
    }

    #[test]
    fn pool_errors_map_to_unavailable() {
        let err = map_sqlx_error("find_customer", sqlx::Error::PoolTimedOut);
        assert!(matches!(err, RepositoryError::Unavailable(msg) if msg.starts_with("find_customer")));
    }
}
