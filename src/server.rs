//! HTTP server initialization and runtime setup.
//!
//! Builds the redirection store, wires it into the router and runs the Axum
//! server until a shutdown signal arrives.

use crate::config::Config;
use crate::domain::store::RedirectionStore;
use crate::infrastructure::store::{MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Redis is configured but unreachable
/// - The listen address is invalid or cannot be bound
/// - The server fails at runtime
pub async fn run(config: Config) -> Result<()> {
    let store = build_store(&config).await?;
    let state = AppState::new(store, config.strict_not_found);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Selects the store backend: Redis when configured, memory otherwise.
async fn build_store(config: &Config) -> Result<Arc<dyn RedirectionStore>> {
    let Some(redis_url) = &config.redis_url else {
        tracing::info!("Store: in-memory");
        return Ok(Arc::new(MemoryStore::new()));
    };

    let store = RedisStore::connect(redis_url, config.redis_key_prefix.clone())
        .await
        .context("Failed to initialize Redis store")?;
    tracing::info!("Store: Redis");
    Ok(Arc::new(store))
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
