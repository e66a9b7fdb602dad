use orderdesk_core::RepositoryError;
use orderdesk_infra::{repositories::postgres, AppConfig, Repositories};
use orderdesk_sales::CreateOrderWorkflow;

/// Everything handlers need, shared behind an `Arc` extension.
#[derive(Clone)]
pub struct AppServices {
    pub repositories: Repositories,
    pub create_order: CreateOrderWorkflow,
}

impl AppServices {
    pub fn new(repositories: Repositories) -> Self {
        let create_order = repositories.order_workflow();
        Self {
            repositories,
            create_order,
        }
    }

    /// In-memory wiring (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory())
    }

    /// Postgres when `DATABASE_URL` is configured, in-memory otherwise.
    pub async fn from_config(config: &AppConfig) -> Result<Self, RepositoryError> {
        match &config.database_url {
            Some(url) => {
                let pool = postgres::connect(url, config.db_max_connections).await?;
                tracing::info!(max_connections = config.db_max_connections, "connected to postgres");
                Ok(Self::new(Repositories::postgres(pool)))
            }
            None => Ok(Self::in_memory()),
        }
    }
}
