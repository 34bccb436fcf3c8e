//! Route definitions for the `/auth` resource.

use axum::routing::post;
use axum::Router;

use crate::handlers::auth;
use crate::state::AppState;

/// Routes mounted at `/auth`.
///
/// ```text
/// POST /signup                 -> sign_up
/// POST /activate/{code}        -> activate
/// POST /signin                 -> sign_in
/// POST /password-reset         -> request_password_reset
/// POST /password-reset/{code}  -> reset_password
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::sign_up))
        .route("/activate/{code}", post(auth::activate))
        .route("/signin", post(auth::sign_in))
        .route("/password-reset", post(auth::request_password_reset))
        .route("/password-reset/{code}", post(auth::reset_password))
}
