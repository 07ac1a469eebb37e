//! blogly-core: domain model for the Blogly application
//!
//! Defines the `User` and `Post` entities, the validated input types the
//! HTTP layer constructs from submitted forms, and the validation errors
//! those constructors return. No I/O lives here; persistence and routing
//! belong to blogly-server.

pub mod models;
pub mod validation;

pub use models::{NewPost, NewUser, Post, User, DEFAULT_IMAGE_URL};
pub use validation::ValidationError;
