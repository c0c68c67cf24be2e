use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use groove_api::config::ServerConfig;
use groove_api::ratelimit::RateLimiter;
use groove_api::router::build_app_router;
use groove_api::state::AppState;
use groove_api::views::ViewCache;
use groove_catalog::CatalogClient;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "groove_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = ServerConfig::from_env();
    tracing::info!(host = %config.host, port = %config.port, production = config.production, "Loaded server configuration");

    // --- Database ---
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = groove_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");
    tracing::info!("Database connection pool created");

    groove_db::health_check(&pool)
        .await
        .expect("Database health check failed");
    tracing::info!("Database health check passed");

    groove_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Database migrations applied");

    // --- Counter / cache store ---
    // Absent or unreachable Redis is survivable: the limiter fails open in
    // development and closed in production, and the view cache degrades to
    // recomputing on every read.
    let redis_conn = match &config.redis_url {
        Some(url) => match init_redis(url).await {
            Ok(conn) => {
                tracing::info!("Redis connection manager created");
                Some(conn)
            }
            Err(err) => {
                tracing::warn!(error = %err, "Redis unavailable, running degraded");
                None
            }
        },
        None => {
            tracing::warn!("REDIS_URL not set, rate limiting and view cache degraded");
            None
        }
    };

    let limiter = RateLimiter::new(redis_conn.clone(), !config.production);
    let cache = ViewCache::new(redis_conn);

    // --- Catalog client ---
    let catalog = Arc::new(CatalogClient::new(config.catalog.clone()));

    // --- App state ---
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        limiter,
        cache,
        catalog,
    };

    // --- Router ---
    let app = build_app_router(state, &config);

    // --- Start server ---
    let addr = SocketAddr::new(
        config.host.parse().expect("Invalid HOST address"),
        config.port,
    );
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");

    tracing::info!("Graceful shutdown complete");
}

/// Connect to Redis with bounded retries and a short connection timeout so
/// startup does not hang on a dead store.
async fn init_redis(redis_url: &str) -> Result<ConnectionManager, redis::RedisError> {
    let config = ConnectionManagerConfig::new()
        .set_number_of_retries(1)
        .set_connection_timeout(Duration::from_millis(500));

    let client = redis::Client::open(redis_url)?;
    client.get_connection_manager_with_config(config).await
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix) so the server
/// shuts down cleanly whether stopped interactively or by a process
/// manager (e.g. systemd, Docker, Kubernetes).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl-C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
