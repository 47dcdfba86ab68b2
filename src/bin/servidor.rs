//! HTTP server binary: store service + catalog API.

use catalogo::api::build_router;
use catalogo::config::ServerConfig;
use catalogo::system::CatalogSystem;
use catalogo::telemetry::setup_tracing;
use tokio::net::TcpListener;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), String> {
    setup_tracing();

    let config = ServerConfig::from_env();
    let system = CatalogSystem::new();
    let app = build_router(system.store.clone());

    let addr = config.bind_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| format!("bind {addr} failed: {e}"))?;
    info!(%addr, "Catalog server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("server failed: {e}"))?;

    system.shutdown().await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for shutdown signal");
    }
}
