//! Lexicache - caching edge and static file server for a vocabulary learning app
//!
//! Provides an in-memory TTL cache layer with statistics, a service-worker-style
//! edge cache with network-first and cache-first strategies, and a static file
//! server with single-page-app routing.

mod api;
mod cache;
mod config;
mod edge;
mod error;
mod models;
mod tasks;

use std::net::SocketAddr;
use std::time::Duration;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use edge::PRECACHE_MANIFEST;
use tasks::spawn_sweeper_task;

/// Main entry point for the caching server.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Build the session cache, origins, and edge cache
/// 4. Run the edge install/activate lifecycle (precache + stale-partition cleanup)
/// 5. Start the background expiry sweeper
/// 6. Create Axum router and start the HTTP server
/// 7. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lexicache=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Lexicache Server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, upstream={}, static_dir={}, api_ttl={}s, static_ttl={}s, sweep_interval={}s, version={}",
        config.server_port,
        config.upstream_url,
        config.static_dir.display(),
        config.api_ttl,
        config.static_ttl,
        config.sweep_interval,
        config.cache_version
    );

    // Build application state: session cache, origins, edge cache
    let state = AppState::from_config(&config);
    info!("Cache layers initialized");

    // Edge lifecycle: precache critical files, drop stale-versioned partitions
    state.edge.install(PRECACHE_MANIFEST).await;
    state.edge.activate();

    // Start background expiry sweeper
    let sweeper_handle = spawn_sweeper_task(
        state.cache.clone(),
        Duration::from_secs(config.sweep_interval),
    );
    info!("Background expiry sweeper started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(sweeper_handle))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweeper task and allows graceful shutdown.
async fn shutdown_signal(sweeper_handle: tokio::task::JoinHandle<()>) {
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
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    // Abort the sweeper task
    sweeper_handle.abort();
    warn!("Expiry sweeper aborted");
}
