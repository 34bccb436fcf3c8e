//! Route definitions for the `/users` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::{lists, users};
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// GET /                -> lists::users
/// GET /{id}            -> profile
/// PUT /{id}/profile    -> edit_profile (self only)
/// PUT /{id}/account    -> edit_account (self only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::users))
        .route("/{id}", get(users::profile))
        .route("/{id}/profile", put(users::edit_profile))
        .route("/{id}/account", put(users::edit_account))
}
