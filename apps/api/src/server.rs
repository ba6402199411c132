//! Server lifecycle: startup, serving and graceful shutdown

use crate::config::AppConfig;
use crate::database;
use crate::routes;
use crate::state::AppState;
use anyhow::Context;
use axum::Router;
use sqlx::SqlitePool;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};

/// Open the pool, bring the schema up to date and assemble the router
pub async fn build_app(config: &AppConfig) -> anyhow::Result<(Router, SqlitePool)> {
    let pool = database::connect(&config.database)
        .await
        .context("failed to connect to database")?;
    database::migrate(&pool)
        .await
        .context("failed to apply database schema")?;

    let state = AppState::new(pool.clone(), &config.auth);
    Ok((routes::router(state, &config.http), pool))
}

/// Serve until Ctrl+C or SIGTERM, then close the pool
pub async fn run(config: AppConfig) -> anyhow::Result<()> {
    let (app, pool) = build_app(&config).await?;

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;

    info!(
        address = %addr,
        app = %config.name,
        environment = ?config.environment,
        "server listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    pool.close().await;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!(error = %err, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
