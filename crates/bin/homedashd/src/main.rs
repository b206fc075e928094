//! # homedashd: homedash daemon
//!
//! Composition root that wires all adapters together and starts the server.
//!
//! ## Responsibilities
//! - Load configuration (config file, env vars)
//! - Install the `tracing` subscriber
//! - Seed the device store from a TOML file or the built-in demo rooms
//! - Construct the notice bus and the device control service
//! - Build the axum router, injecting the service
//! - Bind to a TCP port and serve
//! - Handle graceful shutdown (Ctrl-C)
//!
//! ## Dependency rule
//! This is the **only** crate that depends on all other crates.
//! It is the wiring layer: no domain logic belongs here.

mod config;

use std::sync::Arc;

use homedash_adapter_http_axum::router;
use homedash_adapter_http_axum::state::AppState;
use homedash_app::notice_bus::InProcessNoticeBus;
use homedash_app::services::device_control_service::DeviceControlService;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.filter)?)
        .init();

    // Store
    let store = homedash_adapter_seed::seed_store(config.seed.path.as_deref())?;

    // Notices
    let notice_bus = Arc::new(InProcessNoticeBus::new(config.notices.capacity));

    // Services
    let device_service = DeviceControlService::new(store, Arc::clone(&notice_bus));

    // HTTP
    let state = AppState::new(device_service, notice_bus);
    let app = router::build(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    tracing::info!(%bind_addr, "homedashd listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("homedashd stopped");
    Ok(())
}

async fn shutdown_signal() {
    wait_for_shutdown(tokio::signal::ctrl_c()).await;
}

/// Resolve once `signal` fires. A signal listener that fails never resolves.
async fn wait_for_shutdown(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(err) = signal.await {
        tracing::error!(%err, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn should_resolve_when_signal_arrives() {
        let result = tokio::time::timeout(
            Duration::from_millis(50),
            wait_for_shutdown(std::future::ready(Ok(()))),
        )
        .await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn should_keep_serving_when_signal_listener_fails() {
        let failed = std::future::ready(Err(std::io::Error::other("no signal handler")));
        let result =
            tokio::time::timeout(Duration::from_millis(50), wait_for_shutdown(failed)).await;
        assert!(result.is_err());
    }
}
