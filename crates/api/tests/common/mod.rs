#![allow(dead_code)]

use std::sync::Arc;

use aristotle_api::auth::jwt::{generate_access_token, JwtConfig};
use aristotle_api::auth::password::hash_password;
use aristotle_api::config::ServerConfig;
use aristotle_api::router::build_app_router;
use aristotle_api::state::AppState;
use aristotle_core::account::DEFAULT_GENDER;
use aristotle_core::listing::ListingConfig;
use aristotle_db::models::user::{CreateUser, User};
use aristotle_db::repositories::{MemberRepo, UserRepo};
use aristotle_events::AccountNotifier;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

pub const TEST_PASSWORD: &str = "test_password_123!";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        app_base_url: "http://localhost:5173".to_string(),
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        listing: ListingConfig::default(),
    }
}

/// Build the full application router, with the production middleware
/// stack, on the given pool. Emails are logged, never sent.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier: AccountNotifier::log_only(config.app_base_url.clone()),
    };
    build_app_router(state, &config)
}

/// Insert an activated user with a profile and return it with a valid token.
pub async fn create_user(pool: &PgPool, username: &str) -> (User, String) {
    let hashed = hash_password(TEST_PASSWORD).expect("hashing should succeed");
    let user = UserRepo::create(
        pool,
        &CreateUser {
            username: username.to_string(),
            email: format!("{username}@test.com"),
            password_hash: hashed,
        },
    )
    .await
    .expect("user creation should succeed");
    MemberRepo::create_default(pool, user.id, DEFAULT_GENDER)
        .await
        .expect("member creation should succeed");
    UserRepo::activate(pool, user.id)
        .await
        .expect("activation should succeed");

    let token = generate_access_token(user.id, &test_config().jwt).expect("token should encode");
    (user, token)
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("Authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("Content-Type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

/// GET as an anonymous visitor identified by `x-session-id`.
pub async fn get_with_session(app: Router, uri: &str, session: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("x-session-id", session)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, None, Some(body)).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

/// POST without a body (e.g. accept, activate).
pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
