//! Route definitions for the `/answers` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::answers;
use crate::state::AppState;

/// Routes mounted at `/answers`.
///
/// ```text
/// PUT    /{id}             -> edit
/// DELETE /{id}             -> delete
/// POST   /{id}/accept      -> accept
/// POST   /{id}/appends     -> append
/// GET    /{id}/comments    -> list_comments
/// POST   /{id}/comments    -> comment
/// POST   /{id}/votes       -> vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}", put(answers::edit).delete(answers::delete))
        .route("/{id}/accept", post(answers::accept))
        .route("/{id}/appends", post(answers::append))
        .route(
            "/{id}/comments",
            get(answers::list_comments).post(answers::comment),
        )
        .route("/{id}/votes", post(answers::vote))
}
