//! DevHub API server.
//!
//! Reads settings from the environment (and `.env`), connects the configured store and
//! serves HTTP until interrupted.

use devhub_api::{app, connect, AppState, MemoryStore, Settings, StoreKind};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("devhub_api=info,tower_http=info")
            }),
        )
        .init();

    let settings = Settings::from_env()?;
    let state = match settings.store {
        StoreKind::Postgres => AppState::new(connect(&settings.database).await?),
        StoreKind::Memory => {
            tracing::warn!("using in-memory store; data is lost on exit");
            AppState::new(MemoryStore::new())
        }
    };

    let listener = TcpListener::bind(settings.bind_addr).await?;
    tracing::info!("DevHub API listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
