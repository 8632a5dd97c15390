use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use opportunity_api::config;
use opportunity_api::database::{DatabaseManager, PgOpportunityStore};
use opportunity_api::search::SearchEngine;
use opportunity_api::{app, is_production, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug")))
        .init();

    let config = config::config();
    tracing::info!("Starting Opportunity API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        if is_production!() {
            anyhow::bail!("JWT_SECRET must be set in production");
        }
        tracing::warn!("JWT_SECRET is not set; sponsor endpoints will reject every request");
    }

    let pool = DatabaseManager::pool(&config.database)
        .await
        .context("failed to connect to the opportunity database")?;
    let store = Arc::new(PgOpportunityStore::new(pool));
    let engine = SearchEngine::new(store, config.search.clone());
    let app = app(AppState::new(engine, config.security.clone()));

    let bind_addr = format!("0.0.0.0:{}", config.api.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Opportunity API listening on http://{}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    DatabaseManager::close().await;
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
