//! Gearbase - backend cache and access-control layer for a vehicle
//! technical knowledge base.

mod api;
mod auth;
mod cache;
mod config;
mod error;
mod models;
mod ratelimit;
mod repo;
mod tasks;

use std::net::SocketAddr;

use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api::{create_router, AppState};
use config::Config;
use tasks::spawn_sweep_task;

/// Main entry point.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Verify the role/capability table is complete
/// 4. Create application state (cache, repository, rate limiter)
/// 5. Start the background expiry sweep
/// 6. Create the axum router with all endpoints
/// 7. Start the HTTP server on the configured port
/// 8. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gearbase=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gearbase API server");

    // Load configuration from environment variables
    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, default_ttl={}s, sweep_interval={}s, rate_limit={}/{}s, dev_mode={}",
        config.server_port,
        config.default_ttl,
        config.sweep_interval,
        config.rate_limit_max,
        config.rate_limit_window,
        config.dev_mode
    );
    error::set_dev_mode(config.dev_mode);

    // A capability missing from the admin list is a build defect; refuse
    // to start rather than silently drop privileges.
    if let Err(msg) = auth::verify_role_table() {
        panic!("role table verification failed: {msg}");
    }

    // Create application state
    let state = AppState::from_config(&config);
    info!("Cache store and repository initialized");

    // Start background expiry sweep
    let sweep_handle = spawn_sweep_task(
        state.cache.clone(),
        state.limiter.clone(),
        config.sweep_interval,
    );
    info!("Background sweep task started");

    // Create router with all endpoints
    let app = create_router(state);

    // Bind to configured port
    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind server port");
    info!("Server listening on http://{}", addr);

    // Start server with graceful shutdown; peer addresses feed the
    // rate limiter when no forwarding proxy is in front.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal(sweep_handle))
        .await
        .expect("Server error");

    info!("Server shutdown complete");
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the sweep task and allows graceful shutdown.
async fn shutdown_signal(sweep_handle: tokio::task::JoinHandle<()>) {
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

    // Abort the sweep task
    sweep_handle.abort();
    warn!("Sweep task aborted");
}
