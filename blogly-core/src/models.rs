//! User and Post entities plus validated input types.
//!
//! Entities map 1:1 onto the `users` and `posts` tables. The `New*` types
//! are what the route handlers build out of submitted form data; their
//! constructors enforce required fields and length limits so that bad input
//! never reaches the repository layer.

use sqlx::FromRow;

use crate::validation::ValidationError;

/// Image assigned to a user when the form leaves the URL blank.
pub const DEFAULT_IMAGE_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/a/ac/Default_pfp.jpg";

/// Maximum length for first and last names
const MAX_NAME_LEN: usize = 50;

/// Maximum length for image URLs
const MAX_IMAGE_URL_LEN: usize = 100;

/// A registered user. `id` is assigned by the database and never changes.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: Option<String>,
    pub image_url: String,
}

impl User {
    /// Display name: `"first last"`, or just the first name when no last
    /// name is set.
    pub fn full_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }
}

/// A blog post owned by one user.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Post {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub user_id: i32,
}

/// Validated user payload, used for both create and edit (the mutable
/// fields are identical).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub first_name: String,
    pub last_name: Option<String>,
    pub image_url: String,
}

impl NewUser {
    /// Build a user payload from raw form values.
    ///
    /// # Rules
    /// - `first_name` is required, max 50 characters
    /// - `last_name` is optional; an empty string becomes `None`
    /// - `image_url` falls back to [`DEFAULT_IMAGE_URL`] when empty,
    ///   max 100 characters
    pub fn new(
        first_name: &str,
        last_name: &str,
        image_url: &str,
    ) -> Result<Self, ValidationError> {
        if first_name.is_empty() {
            return Err(ValidationError::Empty {
                field: "first name",
            });
        }
        // VARCHAR(n) counts characters, not bytes
        if first_name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "first name",
                max: MAX_NAME_LEN,
            });
        }
        if last_name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "last name",
                max: MAX_NAME_LEN,
            });
        }

        let image_url = if image_url.is_empty() {
            DEFAULT_IMAGE_URL.to_owned()
        } else {
            image_url.to_owned()
        };
        if image_url.chars().count() > MAX_IMAGE_URL_LEN {
            return Err(ValidationError::TooLong {
                field: "image URL",
                max: MAX_IMAGE_URL_LEN,
            });
        }

        Ok(Self {
            first_name: first_name.to_owned(),
            last_name: if last_name.is_empty() {
                None
            } else {
                Some(last_name.to_owned())
            },
            image_url,
        })
    }
}

/// Validated post payload, used for both create and edit. The owning
/// user's id comes from the request path, not the form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub content: String,
}

impl NewPost {
    /// Build a post payload from raw form values. Both fields are required.
    pub fn new(title: &str, content: &str) -> Result<Self, ValidationError> {
        if title.is_empty() {
            return Err(ValidationError::Empty { field: "title" });
        }
        if content.is_empty() {
            return Err(ValidationError::Empty { field: "content" });
        }

        Ok(Self {
            title: title.to_owned(),
            content: content.to_owned(),
        })
    }
}
