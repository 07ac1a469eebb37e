//! blogly-server: HTTP application for Blogly
//!
//! Wires the connection pool, migrations, and the CRUD routes for users
//! and posts into an axum service with server-rendered views.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use sqlx::PgPool;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

pub mod db;
pub mod http;
pub mod state;

pub use state::AppState;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind to (default: 127.0.0.1:3030)
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string
    pub database_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3030)),
            database_url: std::env::var("DATABASE_URL")
                .unwrap_or_else(|_| "postgres://localhost/blogly".to_string()),
        }
    }
}

/// Build the application router with all routes
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(http::routes::users::router())
        .merge(http::routes::posts::router())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

/// Server error type
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("database error: {0}")]
    Db(#[from] db::DbError),

    #[error("connection error: {0}")]
    Sqlx(#[from] sqlx::Error),
}

/// Connect the pool, run migrations, and serve until shutdown.
pub async fn run_server(config: ServerConfig) -> Result<(), ServerError> {
    let pool = db::create_pool(&config.database_url).await?;
    db::migrations::run(&pool).await?;

    serve(pool, config.bind_addr).await
}

/// Serve an already-connected pool. Split out so tests and callers that
/// manage their own pool can reuse it.
pub async fn serve(pool: PgPool, bind_addr: SocketAddr) -> Result<(), ServerError> {
    let app = build_router(AppState::new(pool));

    let listener = TcpListener::bind(bind_addr).await?;
    tracing::info!("Server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, starting shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, starting shutdown");
        }
    }
}
