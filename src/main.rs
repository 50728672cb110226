//! MMD Backend server binary.
//!
//! Startup sequence:
//! - parse flags, load `.env`
//! - open (or create) the SQLite database in the data directory
//! - apply migrations when automigrate is on
//! - serve the webhook API with the static frontend as fallback

use anyhow::{Context, Result};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mmd_backend::{build_router, AppState, Config, Store};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true))
        .init();

    info!("server_starting");

    let config = Config::load();
    info!(
        port = config.port,
        data_dir = %config.data_dir.display(),
        public_dir = %config.public_dir.display(),
        index_fallback = config.index_fallback,
        automigrate = config.automigrate,
        hook_secret_configured = config.hook_secret.is_some(),
        "config_loaded"
    );

    if config.hook_secret.is_none() {
        warn!("hook_secret_not_configured");
    }

    // Hook scripts are executed by an external runtime; the flags are
    // accepted here so one command line drives the whole deployment.
    if config.hooks_dir.exists() {
        info!(
            hooks_dir = %config.hooks_dir.display(),
            hooks_watch = config.hooks_watch,
            hooks_pool = config.hooks_pool,
            "hooks_configured"
        );
    } else {
        warn!(hooks_dir = %config.hooks_dir.display(), "hooks_dir_missing");
    }

    std::fs::create_dir_all(&config.data_dir).context("Failed to create data directory")?;

    let store = Store::connect(&config.database_url())
        .await
        .context("Failed to open database")?;

    if config.automigrate {
        store
            .run_migrations(&config.migrations_dir)
            .await
            .context("Failed to apply migrations")?;
    }

    let addr = config.socket_addr();
    let state = AppState::new(config, store);
    let app = build_router(state);

    let listener = TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    info!(address = %addr, "server_listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("server_shutdown_complete");

    Ok(())
}

/// Create a future that completes when a shutdown signal is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT"),
        _ = terminate => info!("Received SIGTERM"),
    }

    info!("server_shutting_down");
}
