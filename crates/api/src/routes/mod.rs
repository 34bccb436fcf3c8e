pub mod answers;
pub mod auth;
pub mod health;
pub mod questions;
pub mod tags;
pub mod users;

use axum::routing::get;
use axum::Router;

use crate::handlers::lists;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                      sign up (public)
/// /auth/activate/{code}             activate account (public)
/// /auth/signin                      sign in (public)
/// /auth/password-reset              request reset link (public)
/// /auth/password-reset/{code}       set new password (public)
///
/// /home                             newest questions
/// /search                           substring search
///
/// /questions                        list, ask
/// /questions/{id}                   detail (answers paged), edit, delete
/// /questions/{id}/appends           append (author only)
/// /questions/{id}/comments          list (paged), comment
/// /questions/{id}/answers           answer
/// /questions/{id}/votes             vote
///
/// /answers/{id}                     edit, delete
/// /answers/{id}/accept              accept (question author only)
/// /answers/{id}/appends             append (author only)
/// /answers/{id}/comments            list (paged), comment
/// /answers/{id}/votes               vote
///
/// /tags                             tag counts
/// /tags/{name}/questions            questions carrying a tag
///
/// /users                            user list
/// /users/{id}                       profile
/// /users/{id}/profile               edit profile (self only)
/// /users/{id}/account               edit account (self only)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .route("/home", get(lists::home))
        .route("/search", get(lists::search))
        .nest("/questions", questions::router())
        .nest("/answers", answers::router())
        .nest("/tags", tags::router())
        .nest("/users", users::router())
}
