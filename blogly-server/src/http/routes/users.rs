//! User routes: list, profile, create, edit, delete

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::{Html, Redirect},
    routing::{get, post},
    Form, Router,
};
use serde::Deserialize;

use blogly_core::NewUser;

use crate::db::{PostRepo, UserRepo};
use crate::http::error::AppError;
use crate::http::templates::{
    render, CreateUserPage, EditUserPage, ProfilePage, UserListPage,
};
use crate::state::AppState;

/// Create/edit form payload. Fields default to empty so a missing key
/// becomes a validation error instead of a deserialization failure; the
/// image field is named `url` to match the form contract.
#[derive(Deserialize)]
pub struct UserForm {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub url: String,
}

/// Edit form payload: the same fields plus the id of the row to
/// overwrite. Kept flat; urlencoded forms and `serde(flatten)` disagree
/// about typed fields.
#[derive(Deserialize)]
pub struct EditUserForm {
    pub id: i32,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub url: String,
}

/// GET / - redirect to the user list
async fn home() -> Redirect {
    Redirect::to("/user_list")
}

/// GET /user_list - list all users
async fn list_users(State(state): State<Arc<AppState>>) -> Result<Html<String>, AppError> {
    let users = UserRepo::new(&state.pool).list().await?;
    render(&UserListPage { users })
}

/// GET /create_user - show the creation form
async fn create_user_form() -> Result<Html<String>, AppError> {
    render(&CreateUserPage)
}

/// POST /create_user - insert a user, then redirect to their profile
async fn create_user(
    State(state): State<Arc<AppState>>,
    Form(form): Form<UserForm>,
) -> Result<Redirect, AppError> {
    let new_user = NewUser::new(&form.first_name, &form.last_name, &form.url)?;
    let user = UserRepo::new(&state.pool).create(&new_user).await?;

    tracing::info!(user_id = user.id, "user created");
    Ok(Redirect::to(&format!("/{}", user.id)))
}

/// GET /{id} - show a user's profile with their posts
async fn show_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    let posts = PostRepo::new(&state.pool).list_for_user(id).await?;
    render(&ProfilePage { user, posts })
}

/// GET /edit_user/{id} - show the edit form
async fn edit_user_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Html<String>, AppError> {
    let user = UserRepo::new(&state.pool).get(id).await?;
    render(&EditUserPage { user })
}

/// POST /edit_user - overwrite the mutable fields, then redirect back to
/// the profile. The target id rides in the form.
async fn edit_user(
    State(state): State<Arc<AppState>>,
    Form(form): Form<EditUserForm>,
) -> Result<Redirect, AppError> {
    let fields = NewUser::new(&form.first_name, &form.last_name, &form.url)?;
    let user = UserRepo::new(&state.pool).update(form.id, &fields).await?;

    Ok(Redirect::to(&format!("/{}", user.id)))
}

/// POST /delete_user/{id} - delete a user (their posts cascade away)
async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Redirect, AppError> {
    UserRepo::new(&state.pool).delete(id).await?;

    tracing::info!(user_id = id, "user deleted");
    Ok(Redirect::to("/"))
}

/// User routes. Static paths take precedence over the `/{id}` capture.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/user_list", get(list_users))
        .route("/create_user", get(create_user_form).post(create_user))
        .route("/edit_user", post(edit_user))
        .route("/edit_user/{id}", get(edit_user_form))
        .route("/delete_user/{id}", post(delete_user))
        .route("/{id}", get(show_user))
}
