//! Application error type with IntoResponse
//!
//! Errors become server-rendered HTML error pages with the appropriate
//! status code. Database detail is logged, never shown to the client.

use askama::Template;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};

use blogly_core::ValidationError;

use crate::db::DbError;
use crate::http::templates::ErrorPage;

/// Application error with automatic HTTP status mapping
#[derive(Debug)]
pub enum AppError {
    /// Form validation failed (400)
    Validation(ValidationError),

    /// Resource not found (404)
    NotFound { resource: &'static str, id: i32 },

    /// Unique or foreign-key constraint violated (409)
    Conflict { message: String },

    /// Database error (500, logged)
    Database(DbError),

    /// Template rendering failed (500, logged)
    Template(askama::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
            Self::NotFound { resource, id } => {
                (StatusCode::NOT_FOUND, format!("{} {} not found", resource, id))
            }
            Self::Conflict { message } => (StatusCode::CONFLICT, message.clone()),
            Self::Database(e) => {
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
            Self::Template(e) => {
                tracing::error!("Template error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "an internal error occurred".to_string(),
                )
            }
        };

        let page = ErrorPage {
            status: status.as_u16(),
            message: &message,
        };
        let body = page
            .render()
            .unwrap_or_else(|_| format!("<h1>{}</h1><p>{}</p>", status.as_u16(), message));

        (status, Html(body)).into_response()
    }
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(e)
    }
}

impl From<DbError> for AppError {
    fn from(e: DbError) -> Self {
        match e {
            DbError::NotFound { resource, id } => Self::NotFound { resource, id },
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                Self::Conflict {
                    message: e.to_string(),
                }
            }
            _ => Self::Database(e),
        }
    }
}

impl From<askama::Error> for AppError {
    fn from(e: askama::Error) -> Self {
        Self::Template(e)
    }
}
