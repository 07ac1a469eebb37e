//! Repositories for users and posts
//!
//! Each repository borrows the pool and issues single-statement CRUD
//! queries. Mutations use `RETURNING` so that a missing row surfaces as
//! `DbError::NotFound` instead of silently affecting zero rows.

mod posts;
mod users;

pub use posts::PostRepo;
pub use users::UserRepo;

use sqlx::error::ErrorKind;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} {id}")]
    NotFound { resource: &'static str, id: i32 },

    #[error("{field} is already taken")]
    UniqueViolation { field: &'static str },

    #[error("{field} does not reference an existing row")]
    ForeignKeyViolation { field: &'static str },
}

/// Classify a constraint failure on `field`; anything else stays a plain
/// sqlx error.
fn constraint_error(err: sqlx::Error, field: &'static str) -> DbError {
    if let sqlx::Error::Database(db_err) = &err {
        match db_err.kind() {
            ErrorKind::UniqueViolation => return DbError::UniqueViolation { field },
            ErrorKind::ForeignKeyViolation => return DbError::ForeignKeyViolation { field },
            _ => {}
        }
    }
    DbError::Sqlx(err)
}
