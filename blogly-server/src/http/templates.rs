//! Askama templates for the Blogly views
//!
//! One struct per page; the HTML lives in `templates/`. Handlers render
//! these to `Html<String>` rather than relying on a framework integration.

use askama::Template;
use axum::response::Html;

use blogly_core::{Post, User};

use crate::http::error::AppError;

/// Render a template to an HTML response body.
pub fn render<T: Template>(template: &T) -> Result<Html<String>, AppError> {
    Ok(Html(template.render()?))
}

#[derive(Template)]
#[template(path = "user_list.html")]
pub struct UserListPage {
    pub users: Vec<User>,
}

#[derive(Template)]
#[template(path = "create_user.html")]
pub struct CreateUserPage;

#[derive(Template)]
#[template(path = "profile.html")]
pub struct ProfilePage {
    pub user: User,
    pub posts: Vec<Post>,
}

#[derive(Template)]
#[template(path = "edit_user.html")]
pub struct EditUserPage {
    pub user: User,
}

#[derive(Template)]
#[template(path = "create_post.html")]
pub struct CreatePostPage {
    pub user: User,
}

#[derive(Template)]
#[template(path = "post_detail.html")]
pub struct PostDetailPage {
    pub post: Post,
    pub author: User,
}

#[derive(Template)]
#[template(path = "edit_post.html")]
pub struct EditPostPage {
    pub post: Post,
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorPage<'a> {
    pub status: u16,
    pub message: &'a str,
}
