use anyhow::Context;

use orderdesk_api::app::{build_app, services::AppServices};
use orderdesk_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::from_env().context("failed to load configuration")?;
    orderdesk_observability::init(config.log_format);

    if !config.uses_postgres() {
        tracing::warn!("DATABASE_URL not set; using in-memory repositories");
    }

    let services = AppServices::from_config(&config)
        .await
        .context("failed to initialise repositories")?;
    let app = build_app(services);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
