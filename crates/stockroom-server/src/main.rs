//! Stockroom HTTP server
//!
//! 起動の流れ: 設定 → tracing → StoragePort → InventoryService → axum

mod backend;
mod config;
mod http;
mod telemetry;

use std::sync::Arc;

use stockroom_core::app::ServiceBuilder;
use tracing::{error, info};

use crate::config::AppConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = AppConfig::load()?;
    telemetry::init_tracing(&config.telemetry);

    // StoragePort は起動時に 1 回だけ作り、明示的に渡す
    let storage = backend::build_storage(&config.binding)?;
    let service = ServiceBuilder::new()
        .storage(storage)
        .container(config.binding.name.clone())
        .quantity(config.inventory.default_quantity)
        .key_strategy(config.inventory.key_strategy)
        .store_timeout(config.binding.store_timeout())
        .build()?;

    info!(
        backend = service.backend(),
        container = service.container(),
        key_strategy = ?config.inventory.key_strategy,
        "inventory service ready"
    );

    let app = http::router(Arc::new(service));
    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "Starting stockroom");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("stockroom stopped");
    Ok(())
}

/// Ctrl-C か SIGTERM を待つ
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!(error = %e, "failed to listen for SIGTERM");
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
    info!("shutdown signal received");
}
