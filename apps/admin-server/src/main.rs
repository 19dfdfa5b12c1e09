//! # Workshop Admin Server
//!
//! Serves the public site API and the admin back-office on one port.
//!
//! ## Startup Sequence
//! ```text
//! 1. Tracing (RUST_LOG, default info,workshop=debug)
//! 2. Config: --config <path> | WORKSHOP_CONFIG | platform config dir, then env overrides
//! 3. Store seeded relative to today's date
//! 4. axum on WORKSHOP_BIND_ADDR:WORKSHOP_PORT (default 0.0.0.0:8080) until Ctrl+C / SIGTERM
//! ```

use std::path::PathBuf;

use chrono::Local;
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use workshop_server::config::ServerConfig;
use workshop_server::router;
use workshop_server::state::{AppState, Clock};
use workshop_store::Store;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = ServerConfig::load(config_path_arg())?;
    let addr = config.http.bind_address();
    info!(
        addr = %addr,
        store = %config.store.name,
        low_stock_threshold = config.inventory.low_stock_threshold,
        "Configuration loaded"
    );

    let store = Store::seeded(Local::now().date_naive());
    let state = AppState::new(store, config, Clock::System);

    let listener = TcpListener::bind(&addr).await?;
    info!(%addr, "Workshop server listening");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,workshop=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).with_target(true).init();
}

/// `--config <path>` from the command line, if given.
fn config_path_arg() -> Option<PathBuf> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--config" {
            return args.next().map(PathBuf::from);
        }
    }
    None
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "Failed to listen for Ctrl+C");
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
                error!(error = %e, "Failed to install SIGTERM handler");
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

    info!("Shutdown signal received");
}
