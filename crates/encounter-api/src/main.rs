use eyre::WrapErr;
use tracing_subscriber::EnvFilter;

use encounter_api::config::ApiConfig;
use encounter_api::router;
use encounter_api::state::AppState;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    let config = ApiConfig::from_env()?;
    let pricer = config.pricer()?;

    // The catalog must resolve before any encounter can exist.
    let source = config.catalog.source();
    let described = source.describe();
    let catalog = tokio::task::spawn_blocking(move || source.load())
        .await?
        .wrap_err_with(|| format!("failed to load catalog from {described}"))?;
    tracing::info!(codes = catalog.len(), "catalog ready");

    let app = router(AppState::new(catalog, pricer).with_max_sessions(config.max_sessions));

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    tracing::info!(addr = %config.bind_addr, "listening");
    axum::serve(listener, app).await?;

    Ok(())
}
