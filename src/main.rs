//! Cache Gateway - HTTP front-end for a Redis-backed LRU cache

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cache_gateway::api::create_router;
use cache_gateway::store::RedisStore;
use cache_gateway::{AppState, CacheGateway, Config};

/// Main entry point for the cache gateway.
///
/// # Startup Sequence
/// 1. Initialize tracing subscriber for logging
/// 2. Load configuration from environment variables
/// 3. Connect to Redis, retrying with backoff
/// 4. Apply the memory bound and eviction policy, seed the counters
/// 5. Start HTTP server on configured port
/// 6. Handle graceful shutdown on SIGINT/SIGTERM
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cache_gateway=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Cache Gateway");

    let config = Config::from_env();
    info!(
        "Configuration loaded: port={}, redis_url={}, maxmemory={}, policy={}, admin_secret={}",
        config.server_port,
        config.redis_url,
        config.eviction.max_memory,
        config.eviction.policy,
        if config.admin_secret.is_some() { "set" } else { "unset" }
    );
    if config.admin_secret.is_none() {
        warn!("ADMIN_SECRET is not set; cleardatabase will reject every request");
    }

    let store = RedisStore::connect_with_retry(&config.redis_connect_options())
        .await
        .with_context(|| format!("failed to connect to Redis at {}", config.redis_url))?;

    let gateway = CacheGateway::new(Arc::new(store), config.admin_secret.clone());
    gateway
        .initialize(&config.eviction)
        .await
        .context("failed to initialize the cache store")?;
    info!("Redis store ready");

    let app = create_router(AppState::new(gateway));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Cache Gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
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
}
