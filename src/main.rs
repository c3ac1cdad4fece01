//! VaultKeep server entry point.
//!
//! Wires configuration, the database, the object store, and the HTTP API
//! together and runs the server until a shutdown signal arrives.

use std::collections::HashMap;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt};

use vaultkeep_core::config::AppConfig;
use vaultkeep_core::error::AppError;
use vaultkeep_database::DatabasePool;
use vaultkeep_storage::ObjectStore;

#[tokio::main]
async fn main() {
    let env = std::env::var("VAULTKEEP_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Main server run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting VaultKeep v{}", env!("CARGO_PKG_VERSION"));

    // Database connection + migrations
    let db = DatabasePool::connect(&config.database).await?;
    vaultkeep_database::migration::run_migrations(db.pool()).await?;

    // Object store: open, scan, then seed the tier table from accounts
    let store = Arc::new(ObjectStore::open(&config.storage).await?);
    let account_repo =
        vaultkeep_database::repositories::AccountRepository::new(db.pool().clone());
    let tiers: HashMap<_, _> = account_repo.account_tiers().await?.into_iter().collect();
    tracing::info!(accounts = tiers.len(), "Seeding subscription tiers");
    store.set_tiers(tiers).await;

    // HTTP server
    let state = vaultkeep_api::build_state(config.clone(), db.pool().clone(), Arc::clone(&store));
    let app = vaultkeep_api::build_router(state);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("VaultKeep server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            shutdown_signal().await;
            tracing::info!("Shutdown signal received, starting graceful shutdown...");
        })
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // New requests are no longer accepted; make late store calls no-ops
    // instead of races against teardown.
    store.close();
    db.close().await;

    tracing::info!("VaultKeep server shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
