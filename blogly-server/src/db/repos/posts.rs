//! Post repository

use blogly_core::{NewPost, Post};
use sqlx::PgPool;

use super::{constraint_error, DbError};

/// Post repository
pub struct PostRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PostRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Look up a post by primary key.
    pub async fn get(&self, id: i32) -> Result<Post, DbError> {
        sqlx::query_as::<_, Post>(
            "SELECT id, title, content, user_id FROM posts WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "post",
            id,
        })
    }

    /// List a user's posts, oldest first.
    pub async fn list_for_user(&self, user_id: i32) -> Result<Vec<Post>, DbError> {
        let posts = sqlx::query_as::<_, Post>(
            "SELECT id, title, content, user_id FROM posts WHERE user_id = $1 ORDER BY id",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(posts)
    }

    /// Insert a post under `user_id`. A nonexistent author maps to
    /// [`DbError::ForeignKeyViolation`].
    pub async fn create(&self, user_id: i32, new_post: &NewPost) -> Result<Post, DbError> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (title, content, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, user_id
            "#,
        )
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(user_id)
        .fetch_one(self.pool)
        .await
        .map_err(|e| constraint_error(e, "author"))
    }

    /// Overwrite title and content of an existing post.
    pub async fn update(&self, id: i32, fields: &NewPost) -> Result<Post, DbError> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts
            SET title = $2, content = $3
            WHERE id = $1
            RETURNING id, title, content, user_id
            "#,
        )
        .bind(id)
        .bind(&fields.title)
        .bind(&fields.content)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "post",
            id,
        })
    }

    /// Delete a post, returning the deleted row so the caller can redirect
    /// to the owning user's page.
    pub async fn delete(&self, id: i32) -> Result<Post, DbError> {
        sqlx::query_as::<_, Post>(
            "DELETE FROM posts WHERE id = $1 RETURNING id, title, content, user_id",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(DbError::NotFound {
            resource: "post",
            id,
        })
    }
}
