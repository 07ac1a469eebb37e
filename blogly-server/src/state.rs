//! Application state shared across handlers

use sqlx::PgPool;

/// Shared application state, wrapped in `Arc` by the router.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
}

impl AppState {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}
