//! Process startup: pool, migrations, lock backend, then serve until Ctrl+C.

use crate::config::Config;
use crate::infrastructure::lock::{GenerationLock, LocalLock, RedisLock};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;

/// Serves the API until a shutdown signal arrives.
///
/// # Errors
///
/// Fails when the database is unreachable, a migration does not apply, or
/// the listen address cannot be bound.
pub async fn run(config: Config) -> Result<()> {
    let pool = connect_pool(&config).await?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    tracing::info!(
        max_connections = config.database.max_connections,
        "Database ready, migrations applied"
    );

    let lock = build_lock(&config).await;

    let state = AppState::new(Arc::new(pool), lock, config.token_signing_secret.clone());

    let app = app_router(state, config.server.behind_proxy);

    let addr: SocketAddr = config.server.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, "Accepting connections");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Creates the PostgreSQL pool with the configured limits.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout)
        .idle_timeout(config.database.idle_timeout)
        .max_lifetime(config.database.max_lifetime)
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")
}

/// Picks the lock backend: Redis when configured and reachable, otherwise in-process.
///
/// The admin CLI uses the same selection so it is excluded against running
/// servers sharing that Redis.
pub async fn build_lock(config: &Config) -> Arc<dyn GenerationLock> {
    let ttl = config.generation.lock_ttl;

    if let Some(redis_url) = &config.redis_url {
        match RedisLock::connect(redis_url, ttl.as_secs()).await {
            Ok(redis) => {
                tracing::info!(backend = "redis", "Generation lock ready");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Redis unavailable, falling back to in-process lock");
            }
        }
    } else {
        tracing::info!(backend = "local", "Generation lock ready");
    }

    Arc::new(LocalLock::new(ttl))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
