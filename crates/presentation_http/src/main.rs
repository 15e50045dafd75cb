//! Catalog resilience lab HTTP server
//!
//! Main entry point for the HTTP API server.

use std::{future::IntoFuture, sync::Arc, time::Duration};

use infrastructure::{AppConfig, build_catalog_service, init_telemetry, install_prometheus_recorder};
use presentation_http::{AppState, create_router, set_expose_internal_errors};
use tokio::{net::TcpListener, signal, sync::Notify};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Config first: it decides the log format
    let (config, load_error) = match AppConfig::load() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    let _telemetry = init_telemetry(&config.telemetry, config.server.log_format)?;

    info!("Catalog resilience lab v{} starting...", env!("CARGO_PKG_VERSION"));
    if let Some(e) = load_error {
        warn!(error = %e, "Failed to load config, using defaults");
    }

    set_expose_internal_errors(config.expose_internal_errors());

    info!(
        environment = %config.environment,
        host = %config.server.host,
        port = config.server.port,
        "Configuration loaded"
    );

    let catalog = Arc::new(build_catalog_service(&config)?);
    let mut state = AppState::new(catalog, Arc::new(config.clone()));
    match install_prometheus_recorder() {
        Ok(handle) => state = state.with_metrics(handle),
        Err(e) => warn!(error = %e, "Prometheus recorder unavailable, /metrics disabled"),
    }

    let app = create_router(state);

    let addr = config.server.bind_address();
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));
    let signalled = Arc::new(Notify::new());

    let server = axum::serve(listener, app)
        .with_graceful_shutdown({
            let signalled = Arc::clone(&signalled);
            async move {
                shutdown_signal().await;
                signalled.notify_one();
            }
        })
        .into_future();

    tokio::select! {
        result = server => result?,
        () = async {
            signalled.notified().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(timeout = ?shutdown_timeout, "Connections still open after shutdown timeout, exiting");
        }
    }

    info!("Server shutdown complete");

    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        // Log error but continue waiting - this is a best-effort signal handler
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }
}
