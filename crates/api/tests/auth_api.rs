//! HTTP-level tests for accounts: sign-up, activation, sign-in, password
//! reset, profiles and account edits.

mod common;

use aristotle_core::types::DbId;
use axum::http::StatusCode;
use common::{body_json, create_user, get, post_json, post_json_auth, put_json_auth, TEST_PASSWORD};
use serde_json::json;
use sqlx::PgPool;

fn sign_up_body(username: &str) -> serde_json::Value {
    json!({
        "username": username,
        "email": format!("{username}@example.com"),
        "password": "s3cret-pass",
        "repassword": "s3cret-pass",
    })
}

async fn activation_code(pool: &PgPool, user_id: DbId) -> String {
    sqlx::query_scalar("SELECT code FROM activations WHERE user_id = $1")
        .bind(user_id)
        .fetch_one(pool)
        .await
        .expect("activation row should exist")
}

async fn reset_code(pool: &PgPool, user_id: DbId) -> Option<String> {
    sqlx::query_scalar("SELECT code FROM password_resets WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .unwrap()
}

async fn sign_in(app: axum::Router, username: &str, password: &str) -> axum::response::Response {
    let body = json!({ "username": username, "password": password });
    post_json(app, "/api/v1/auth/signin", body).await
}

// ---------------------------------------------------------------------------
// Sign-up and activation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_up_activate_sign_in(pool: PgPool) {
    let app = common::build_test_app(pool.clone());

    let response = post_json(app.clone(), "/api/v1/auth/signup", sign_up_body("dora")).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let user = body_json(response).await["data"].clone();
    assert_eq!(user["is_active"], false);
    assert!(user.get("password_hash").is_none());
    let user_id = user["id"].as_i64().unwrap();

    // Inactive accounts cannot sign in yet.
    let response = sign_in(app.clone(), "dora", "s3cret-pass").await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let code = activation_code(&pool, user_id).await;
    assert_eq!(code.len(), 64);
    let response = post_json(app.clone(), &format!("/api/v1/auth/activate/{code}"), json!({})).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["is_active"], true);

    // A code works once.
    let response = post_json(app.clone(), &format!("/api/v1/auth/activate/{code}"), json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = sign_in(app.clone(), "dora", "s3cret-pass").await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["user"]["username"], "dora");
    assert!(data["user"]["last_login_at"].is_null());
    let token = data["access_token"].as_str().unwrap().to_string();

    let body = json!({ "title": "First post", "content": "Hello" });
    let response = post_json_auth(app, "/api/v1/questions", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let last_login: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT last_login_at FROM users WHERE id = $1")
            .bind(user_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert!(last_login.is_some());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_up_creates_default_profile(pool: PgPool) {
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/auth/signup", sign_up_body("erin")).await;
    let user_id = body_json(response).await["data"]["id"].as_i64().unwrap();

    let response = get(app, &format!("/api/v1/users/{user_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["member"]["gender"], "Unknown");
    assert_eq!(data["avatar_url"], "uploads/avatars/defaultavatar.jpg");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_up_rejects_duplicates(pool: PgPool) {
    create_user(&pool, "alice").await;
    let app = common::build_test_app(pool);

    let response = post_json(app.clone(), "/api/v1/auth/signup", sign_up_body("alice")).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let mut body = sign_up_body("alice2");
    body["email"] = json!("alice@test.com");
    let response = post_json(app, "/api/v1/auth/signup", body).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_up_password_mismatch(pool: PgPool) {
    let app = common::build_test_app(pool);
    let mut body = sign_up_body("frank");
    body["repassword"] = json!("something-else");

    let response = post_json(app, "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["fields"][0]["field"], "repassword");
    assert_eq!(json["fields"][0]["message"], "passwords are not identical");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_unknown_activation_code(pool: PgPool) {
    let app = common::build_test_app(pool);
    let response = post_json(app, "/api/v1/auth/activate/not-a-code", json!({})).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_sign_in_bad_credentials(pool: PgPool) {
    create_user(&pool, "alice").await;
    let app = common::build_test_app(pool);

    let response = sign_in(app.clone(), "alice", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = sign_in(app, "nobody", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_invalid_token_is_unauthorized(pool: PgPool) {
    let app = common::build_test_app(pool);
    let body = json!({ "title": "T", "content": "C" });
    let response = post_json_auth(app, "/api/v1/questions", body, "garbage").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Password reset
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_password_reset_flow(pool: PgPool) {
    let (alice, _) = create_user(&pool, "alice").await;
    let app = common::build_test_app(pool.clone());

    let response = post_json(
        app.clone(),
        "/api/v1/auth/password-reset",
        json!({ "email": "nobody@test.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = post_json(
        app.clone(),
        "/api/v1/auth/password-reset",
        json!({ "email": "alice@test.com" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let first = reset_code(&pool, alice.id).await.expect("code issued");

    // A second request replaces the code.
    post_json(
        app.clone(),
        "/api/v1/auth/password-reset",
        json!({ "email": "alice@test.com" }),
    )
    .await;
    let code = reset_code(&pool, alice.id).await.expect("code issued");
    assert_ne!(first, code);

    let body = json!({ "password": "brand-new-pass", "repassword": "brand-new-pass" });
    let response = post_json(
        app.clone(),
        &format!("/api/v1/auth/password-reset/{first}"),
        body.clone(),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let uri = format!("/api/v1/auth/password-reset/{code}");
    let response = post_json(app.clone(), &uri, body.clone()).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(reset_code(&pool, alice.id).await.is_none());

    let response = post_json(app.clone(), &uri, body).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert_eq!(
        sign_in(app.clone(), "alice", TEST_PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
    assert_eq!(
        sign_in(app, "alice", "brand-new-pass").await.status(),
        StatusCode::OK
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_reset_code(pool: PgPool) {
    let (alice, _) = create_user(&pool, "alice").await;
    sqlx::query(
        "INSERT INTO password_resets (user_id, code, expires_at)
         VALUES ($1, 'stale', NOW() - INTERVAL '1 minute')",
    )
    .bind(alice.id)
    .execute(&pool)
    .await
    .unwrap();
    let app = common::build_test_app(pool);

    let body = json!({ "password": "brand-new-pass", "repassword": "brand-new-pass" });
    let response = post_json(app, "/api/v1/auth/password-reset/stale", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["error"], "The code has expired");
}

// ---------------------------------------------------------------------------
// Profiles and account edits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_profile_lists_questions_and_answers(pool: PgPool) {
    let (alice, alice_token) = create_user(&pool, "alice").await;
    let (_, bob_token) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);

    let body = json!({ "title": "Alice asks", "content": "Body" });
    let response = post_json_auth(app.clone(), "/api/v1/questions", body, &alice_token).await;
    let question_id = body_json(response).await["data"]["id"].as_i64().unwrap();
    post_json_auth(
        app.clone(),
        &format!("/api/v1/questions/{question_id}/answers"),
        json!({ "content": "Bob answers" }),
        &bob_token,
    )
    .await;

    let response = get(app.clone(), &format!("/api/v1/users/{}", alice.id)).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["user"]["username"], "alice");
    assert_eq!(data["questions"]["items"][0]["title"], "Alice asks");
    assert_eq!(data["questions"]["pagination"]["total"], 1);
    assert_eq!(data["answers"], json!([]));

    let response = get(app.clone(), "/api/v1/users/999999").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_profile_self_only(pool: PgPool) {
    let (alice, alice_token) = create_user(&pool, "alice").await;
    let (_, bob_token) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/users/{}/profile", alice.id);
    let body = json!({
        "first_name": "Alice",
        "last_name": "Liddell",
        "age": 30,
        "gender": "Female",
        "website": "https://alice.example.com",
        "bio": "Curious",
    });

    let response = put_json_auth(app.clone(), &uri, body.clone(), &bob_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, body, &alice_token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["user"]["first_name"], "Alice");
    assert_eq!(data["member"]["age"], 30);
    assert_eq!(data["member"]["gender"], "Female");
    assert_eq!(data["member"]["bio"], "Curious");

    let response = put_json_auth(
        app,
        &uri,
        json!({ "age": 200, "website": "not a url" }),
        &alice_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let fields: Vec<String> = body_json(response).await["fields"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["field"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(fields, vec!["age", "website"]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_account_password_change(pool: PgPool) {
    let (alice, token) = create_user(&pool, "alice").await;
    let app = common::build_test_app(pool);
    let uri = format!("/api/v1/users/{}/account", alice.id);

    let body = json!({
        "username": "alice",
        "email": "alice@test.com",
        "new_password": "changed-pass",
    });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = json!({
        "username": "alice",
        "email": "alice@test.com",
        "password": "wrong-current",
        "new_password": "changed-pass",
    });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["fields"][0]["field"], "password");

    let body = json!({
        "username": "alice_renamed",
        "email": "renamed@test.com",
        "password": TEST_PASSWORD,
        "new_password": "changed-pass",
    });
    let response = put_json_auth(app.clone(), &uri, body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["user"]["username"], "alice_renamed");

    assert_eq!(
        sign_in(app.clone(), "alice_renamed", "changed-pass").await.status(),
        StatusCode::OK
    );
    assert_eq!(
        sign_in(app, "alice_renamed", TEST_PASSWORD).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_account_username_taken(pool: PgPool) {
    let (alice, token) = create_user(&pool, "alice").await;
    create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);

    let body = json!({ "username": "bob", "email": "alice@test.com" });
    let response = put_json_auth(app, &format!("/api/v1/users/{}/account", alice.id), body, &token).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}
