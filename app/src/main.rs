//! Flamingo swap engine server
//!
//! Serves the swap API and keeps the shared session's reserves fresh.

mod block_watcher;

use anyhow::Context;
use flamingo_api::{start_server, AppState};
use flamingo_core::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flamingo=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .init();

    tracing::info!("Starting Flamingo swap engine");

    let config = AppConfig::load().context("Failed to load configuration")?;
    let state = AppState::new(config.clone()).context("Failed to initialize swap engine")?;

    block_watcher::spawn(state.clone(), config.swap.block_poll_secs);

    start_server(state, shutdown_signal())
        .await
        .context("API server stopped")?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
