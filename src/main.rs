//! ShopHub Agent — realtime notification/chat engine for the ShopHub CRM.
//!
//! Entry point that wires the store, notification hub, and transport
//! together and runs until a shutdown signal arrives.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use shophub_core::config::AppConfig;
use shophub_core::error::AppError;
use shophub_realtime::hub::bridge::spawn_notification_bridge;
use shophub_realtime::hub::toast::TracingToastSink;
use shophub_realtime::{NotificationHub, Transport};
use shophub_store::{FileBackend, NotificationStore};

#[tokio::main]
async fn main() {
    let env = std::env::var("SHOPHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Engine error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

/// Main engine run function
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting ShopHub agent v{}", env!("CARGO_PKG_VERSION"));

    // ── Step 1: Durable notification store ───────────────────────
    let store = NotificationStore::new(Box::new(FileBackend::new(&config.store.path)));

    // ── Step 2: Notification hub ─────────────────────────────────
    let hub = Arc::new(NotificationHub::new(
        store,
        Arc::new(TracingToastSink),
        config.notifications.clone(),
    ));
    tracing::info!(
        restored = hub.notifications().len(),
        unread = hub.unread_count(),
        "Notification hub ready"
    );

    // ── Step 3: Transport + hub bridge ───────────────────────────
    tracing::info!(endpoint = %config.realtime.endpoint, "Opening transport...");
    let transport = Transport::connect(config.realtime.clone());
    let bridge = spawn_notification_bridge(Arc::clone(&hub), transport.subscribe());

    // ── Step 4: Run until shutdown ───────────────────────────────
    shutdown_signal().await;
    tracing::info!("Shutdown signal received, starting graceful shutdown...");

    transport.shutdown();
    bridge.abort();

    tracing::info!("ShopHub agent shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
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
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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
}
