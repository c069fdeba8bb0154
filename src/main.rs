mod api_doc;
mod config;
mod db;
mod error;
mod handlers;
mod kitten;
mod models;
mod routes;
mod service;
mod state;
mod store;

use std::sync::Arc;

use anyhow::Context;
use config::Config;
use db::Database;
use service::KittenService;
use state::AppState;
use store::MongoKittenStore;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    tracing::info!("kitten-service starting");

    let config = Config::from_env()?;
    config.log_startup();

    let database = Database::connect(&config).await?;
    let store = MongoKittenStore::new(database.clone()).await?;

    let state = AppState {
        service: KittenService::new(Arc::new(store)),
        config: Arc::new(config.clone()),
    };

    let addr = config.listen_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    tracing::info!("Service started on {}", addr);

    let served = axum::serve(listener, routes::build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await;

    finish(served, database.close()).await
}

/// Run `close` whether or not the server exited cleanly, then report the
/// server result
async fn finish(
    served: std::io::Result<()>,
    close: impl Future<Output = ()>,
) -> anyhow::Result<()> {
    if let Err(e) = &served {
        tracing::error!("HTTP server error: {}", e);
    }
    close.await;
    served.context("HTTP server error")
}

/// Resolves on Ctrl-C or SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl-C: {}", e);
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
