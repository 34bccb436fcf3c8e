//! Route definitions for the `/tags` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::lists;
use crate::state::AppState;

/// Routes mounted at `/tags`.
///
/// ```text
/// GET /                    -> tags (names with question counts)
/// GET /{name}/questions    -> tagged_questions
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(lists::tags))
        .route("/{name}/questions", get(lists::tagged_questions))
}
