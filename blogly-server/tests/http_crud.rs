//! End-to-end CRUD tests over the router.
//!
//! Tests that never touch a row use a lazily-connected pool and run
//! everywhere. Database-backed tests are ignored by default:
//!
//!   DATABASE_URL=postgres://... cargo test -p blogly-server -- --ignored

use std::time::{SystemTime, UNIX_EPOCH};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower::ServiceExt;

use blogly_core::DEFAULT_IMAGE_URL;
use blogly_server::db::{migrations, PostRepo, UserRepo};
use blogly_server::{build_router, AppState};

/// Router backed by a pool that never actually connects. Good enough for
/// routes that return before running a query.
fn offline_router() -> Router {
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/blogly_offline")
        .expect("lazy pool");
    build_router(AppState::new(pool))
}

async fn db_router() -> (Router, PgPool) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = PgPoolOptions::new()
        .max_connections(2)
        .connect(&url)
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations failed");
    (build_router(AppState::new(pool.clone())), pool)
}

/// First names are unique across the whole table, so fixture names get a
/// per-run suffix; tests can share a database.
fn unique(name: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock before epoch")
        .subsec_nanos();
    format!("{}-{}", name, nanos)
}

async fn get(router: &Router, uri: &str) -> (StatusCode, String) {
    let response = router
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8_lossy(&body).into_owned())
}

async fn post_form(router: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>) {
    let response = router
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(form.to_owned()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_owned());
    (status, location)
}

// --- no database required ---

#[tokio::test]
async fn home_redirects_to_user_list() {
    let router = offline_router();
    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert!(response.status().is_redirection());
    assert_eq!(response.headers()[header::LOCATION], "/user_list");
}

#[tokio::test]
async fn create_user_form_renders() {
    let router = offline_router();
    let (status, body) = get(&router, "/create_user").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("name=\"first_name\""));
    assert!(body.contains("name=\"url\""));
}

#[tokio::test]
async fn create_user_without_first_name_is_400() {
    let router = offline_router();
    let (status, _) = post_form(&router, "/create_user", "last_name=User&url=").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn create_post_without_title_is_400() {
    let router = offline_router();
    let (status, _) = post_form(&router, "/create_post/1", "content=Test+Content").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// --- database required ---

#[tokio::test]
#[ignore = "requires database"]
async fn create_then_show_user() {
    let (router, _pool) = db_router().await;
    let first = unique("New");

    let (status, location) = post_form(
        &router,
        "/create_user",
        &format!("first_name={}&last_name=User&url=", first),
    )
    .await;
    assert!(status.is_redirection());
    let location = location.expect("redirect location");

    let (status, body) = get(&router, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("{} User", first)));
    // Empty url field falls back to the placeholder
    assert!(body.contains(DEFAULT_IMAGE_URL));
}

#[tokio::test]
#[ignore = "requires database"]
async fn duplicate_first_name_is_409() {
    let (router, _pool) = db_router().await;
    let first = unique("Dup");
    let form = format!("first_name={}&last_name=User&url=", first);

    let (status, _) = post_form(&router, "/create_user", &form).await;
    assert!(status.is_redirection());

    let (status, _) = post_form(&router, "/create_user", &form).await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn edit_user_changes_name_and_keeps_id() {
    let (router, pool) = db_router().await;
    let first = unique("Original");
    let user = UserRepo::new(&pool)
        .create(&blogly_core::NewUser::new(&first, "User", "").unwrap())
        .await
        .unwrap();

    let edited = unique("Edited");
    let (status, location) = post_form(
        &router,
        "/edit_user",
        &format!("id={}&first_name={}&last_name=User&url=", user.id, edited),
    )
    .await;
    assert!(status.is_redirection());
    assert_eq!(location.as_deref(), Some(format!("/{}", user.id).as_str()));

    // Read-after-write reflects the edit, id unchanged
    let (status, body) = get(&router, &format!("/{}", user.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains(&format!("{} User", edited)));
    assert!(!body.contains(&first));
}

#[tokio::test]
#[ignore = "requires database"]
async fn edit_missing_user_is_404() {
    let (router, _pool) = db_router().await;
    let (status, _) = post_form(
        &router,
        "/edit_user",
        "id=999999999&first_name=Ghost&last_name=&url=",
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn missing_user_and_post_are_404() {
    let (router, _pool) = db_router().await;

    let (status, _) = get(&router, "/999999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&router, "/post/999999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&router, "/edit_user/999999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = get(&router, "/create_post/999999999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn create_post_for_missing_user_is_409() {
    let (router, _pool) = db_router().await;

    // Valid form, nonexistent author: the FK violation surfaces as a conflict
    let (status, _) = post_form(
        &router,
        "/create_post/999999999",
        "title=Test+Title&content=Test+Content",
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
#[ignore = "requires database"]
async fn delete_user_cascades_posts() {
    let (router, pool) = db_router().await;
    let first = unique("Doomed");
    let user = UserRepo::new(&pool)
        .create(&blogly_core::NewUser::new(&first, "User", "").unwrap())
        .await
        .unwrap();
    let post = PostRepo::new(&pool)
        .create(
            user.id,
            &blogly_core::NewPost::new("Test Title", "Test Content").unwrap(),
        )
        .await
        .unwrap();

    let (status, location) = post_form(&router, &format!("/delete_user/{}", user.id), "").await;
    assert!(status.is_redirection());
    assert_eq!(location.as_deref(), Some("/"));

    let (status, body) = get(&router, "/user_list").await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body.contains(&first));

    // The user's posts went with them
    let (status, _) = get(&router, &format!("/post/{}", post.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "requires database"]
async fn post_lifecycle() {
    let (router, pool) = db_router().await;
    let first = unique("Author");
    let user = UserRepo::new(&pool)
        .create(&blogly_core::NewUser::new(&first, "", "").unwrap())
        .await
        .unwrap();

    let before = PostRepo::new(&pool).list_for_user(user.id).await.unwrap().len();
    let (status, location) = post_form(
        &router,
        &format!("/create_post/{}", user.id),
        "title=Test+Title&content=Test+Content",
    )
    .await;
    assert!(status.is_redirection());
    assert_eq!(location.as_deref(), Some(format!("/{}", user.id).as_str()));

    let posts = PostRepo::new(&pool).list_for_user(user.id).await.unwrap();
    assert_eq!(posts.len(), before + 1);
    let post = posts.last().unwrap();
    assert_eq!(post.title, "Test Title");

    let (status, body) = get(&router, &format!("/post/{}", post.id)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Test Title"));
    assert!(body.contains("Test Content"));

    // Edit, then read back the new values
    let (status, _) = post_form(
        &router,
        &format!("/edit_post/{}", post.id),
        "title=Edited+Title&content=Edited+Content",
    )
    .await;
    assert!(status.is_redirection());
    let (_, body) = get(&router, &format!("/post/{}", post.id)).await;
    assert!(body.contains("Edited Title"));
    assert!(!body.contains("Test Title"));

    // Delete redirects back to the author and the id turns 404
    let (status, location) = post_form(&router, &format!("/delete_post/{}", post.id), "").await;
    assert!(status.is_redirection());
    assert_eq!(location.as_deref(), Some(format!("/{}", user.id).as_str()));

    let (status, _) = get(&router, &format!("/post/{}", post.id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
