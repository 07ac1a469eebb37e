//! User repository

use blogly_core::{NewUser, User};
use sqlx::PgPool;

use super::{constraint_error, DbError};

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List every user. The contract promises no particular order; we sort
    /// by id so the list page is stable.
    pub async fn list(&self) -> Result<Vec<User>, DbError> {
        let users = sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, image_url FROM users ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(users)
    }

    /// Look up a user by primary key.
    pub async fn get(&self, id: i32) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            "SELECT id, first_name, last_name, image_url FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "user",
            id,
        })
    }

    /// Insert a user. A duplicate first name maps to
    /// [`DbError::UniqueViolation`].
    pub async fn create(&self, new_user: &NewUser) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (first_name, last_name, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, image_url
            "#,
        )
        .bind(&new_user.first_name)
        .bind(&new_user.last_name)
        .bind(&new_user.image_url)
        .fetch_one(self.pool)
        .await
        .map_err(|e| constraint_error(e, "first name"))
    }

    /// Overwrite the three mutable fields of an existing user. The id is
    /// immutable; a missing row is [`DbError::NotFound`].
    pub async fn update(&self, id: i32, fields: &NewUser) -> Result<User, DbError> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, image_url = $4
            WHERE id = $1
            RETURNING id, first_name, last_name, image_url
            "#,
        )
        .bind(id)
        .bind(&fields.first_name)
        .bind(&fields.last_name)
        .bind(&fields.image_url)
        .fetch_optional(self.pool)
        .await
        .map_err(|e| constraint_error(e, "first name"))?
        .ok_or(DbError::NotFound {
            resource: "user",
            id,
        })
    }

    /// Delete a user. Their posts go with them via the FK cascade.
    pub async fn delete(&self, id: i32) -> Result<(), DbError> {
        sqlx::query("DELETE FROM users WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(DbError::NotFound {
                resource: "user",
                id,
            })?;

        Ok(())
    }
}
