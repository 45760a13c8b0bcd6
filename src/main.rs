use anyhow::Context;
use dotenvy::dotenv;
use quill::logging::init_tracing;
use quill::metrics::init_metrics;
use quill::router::init_router;
use quill::state::init_app_state;
use quill_config::AppConfig;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let config = AppConfig::from_env();
    let _log_guard = init_tracing(&config.logging)?;

    let metrics =
        init_metrics(&config.metrics).context("Failed to install Prometheus recorder")?;
    let state = init_app_state(&config)
        .await
        .context("Failed to initialise application state")?;
    let app = init_router(state, metrics);

    let address = config.server.address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!(%address, "Server running");
    info!("Swagger UI available at http://{}/swagger-ui", address);
    info!("Scalar UI available at http://{}/scalar", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
    }
}
