use anyhow::Context;

use staffdir_api::config::ApiConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    staffdir_observability::init();

    let config = ApiConfig::from_env().context("failed to load configuration")?;
    let app = staffdir_api::app::build_app(&config);

    let listener = tokio::net::TcpListener::bind(&config.bind_address)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_address))?;

    tracing::info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}
