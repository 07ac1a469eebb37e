//! Database migrations for the users and posts tables

use sqlx::PgPool;

use super::repos::DbError;

/// Run all migrations. Idempotent; executed at every boot.
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running migrations...");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id SERIAL PRIMARY KEY,
            first_name VARCHAR(50) NOT NULL UNIQUE,
            last_name VARCHAR(50),
            image_url VARCHAR(100) NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    // Posts go away with their owner; the cascade is load-bearing for
    // delete_user and covered by integration tests.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS posts (
            id SERIAL PRIMARY KEY,
            title TEXT NOT NULL,
            content TEXT NOT NULL,
            user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_user_id ON posts(user_id)")
        .execute(pool)
        .await?;

    tracing::info!("Migrations complete");
    Ok(())
}
