// SPDX-FileCopyrightText: 2026 Meeple Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `meeple serve` command implementation.
//!
//! Opens the SQLite store, builds the Gemini provider and serves the chat
//! page until SIGINT or SIGTERM.

use std::sync::Arc;

use meeple_agent::ChatService;
use meeple_config::MeepleConfig;
use meeple_core::error::MeepleError;
use meeple_core::{ProviderAdapter, StorageAdapter};
use meeple_gateway::{AppState, ServerConfig, start_server};
use meeple_gemini::GeminiProvider;
use meeple_storage::SqliteStorage;
use tracing::{info, warn};

/// Runs the `meeple serve` command.
///
/// A missing or invalid API key does not stop the server: the page still
/// renders and every chat request is answered with the unavailable message.
pub async fn run_serve(config: MeepleConfig) -> Result<(), MeepleError> {
    init_tracing(&config.app.log_level);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = config.storage.database_path,
        "starting meeple"
    );

    let storage = SqliteStorage::new(config.storage.clone());
    storage.initialize().await?;
    let storage: Arc<dyn StorageAdapter> = Arc::new(storage);

    let provider: Option<Arc<dyn ProviderAdapter>> = match GeminiProvider::new(&config) {
        Ok(p) => Some(Arc::new(p)),
        Err(e) => {
            warn!(error = %e, "Gemini client unavailable, chat requests will fail");
            None
        }
    };

    let chat = Arc::new(ChatService::from_config(&config, provider, storage.clone()));
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let served = start_server(&server_config, AppState::new(chat), shutdown_signal()).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "failed to close storage cleanly");
    }
    served?;

    info!("meeple serve shutdown complete");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C), shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over the configured level.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!("meeple={log_level},tower_http={log_level},warn"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
