//! Post routes: view, create, edit, delete

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use blogly_core::NewPost;

use crate::db::{PostRepo, UserRepo};
use crate::http::error::AppError;
use crate::http::templates::{render, CreatePostPage, EditPostPage, PostDetailPage};
use crate::state::AppState;

/// Create/edit form payload for a post.
#[derive(Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
}

/// GET /create_post/{user_id} - show the post form for a user
async fn create_post_form(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let user = UserRepo::new(&state.pool).get(user_id).await?;
    render(&CreatePostPage { user })
}

/// POST /create_post/{user_id} - insert a post, then redirect to the author
async fn create_post(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<i32>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let new_post = NewPost::new(&form.title, &form.content)?;
    let post = PostRepo::new(&state.pool).create(user_id, &new_post).await?;

    tracing::info!(post_id = post.id, user_id, "post created");
    Ok(Redirect::to(&format!("/{}", user_id)))
}

/// GET /post/{id} - show a post with its author
async fn show_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let post = PostRepo::new(&state.pool).get(id).await?;
    let author = UserRepo::new(&state.pool).get(post.user_id).await?;
    render(&PostDetailPage { post, author })
}

/// GET /edit_post/{id} - show the edit form
async fn edit_post_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let post = PostRepo::new(&state.pool).get(id).await?;
    render(&EditPostPage { post })
}

/// POST /edit_post/{id} - overwrite title and content, redirect to the post
async fn edit_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    Form(form): Form<PostForm>,
) -> Result<Redirect, AppError> {
    let fields = NewPost::new(&form.title, &form.content)?;
    let post = PostRepo::new(&state.pool).update(id, &fields).await?;

    Ok(Redirect::to(&format!("/post/{}", post.id)))
}

/// POST /delete_post/{id} - delete a post, redirect to its author
async fn delete_post(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    let post = PostRepo::new(&state.pool).delete(id).await?;

    tracing::info!(post_id = id, "post deleted");
    Ok(Redirect::to(&format!("/{}", post.user_id)))
}

/// Post routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/create_post/{user_id}", get(create_post_form).post(create_post))
        .route("/post/{id}", get(show_post))
        .route("/edit_post/{id}", get(edit_post_form).post(edit_post))
        .route("/delete_post/{id}", post(delete_post))
}
