use anyhow::Context;

use storegate_infra::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is normal outside local development.
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env().context("invalid configuration")?;
    storegate_observability::init(config.log_format);

    let services = storegate_api::app::services::build_services(&config)
        .await
        .context("failed to build store clients")?;
    let app = storegate_api::app::build_app(services, config.max_upload_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    tracing::info!(
        addr = %listener.local_addr()?,
        backend = ?config.backend,
        "listening"
    );

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
