//! Route definitions for the `/questions` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::questions;
use crate::state::AppState;

/// Routes mounted at `/questions`.
///
/// ```text
/// GET    /                 -> list
/// POST   /                 -> ask
/// GET    /{id}             -> get_by_id (counts the view)
/// PUT    /{id}             -> edit
/// DELETE /{id}             -> delete
/// POST   /{id}/appends     -> append
/// GET    /{id}/comments    -> list_comments
/// POST   /{id}/comments    -> comment
/// POST   /{id}/answers     -> answer
/// POST   /{id}/votes       -> vote
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(questions::list).post(questions::ask))
        .route(
            "/{id}",
            get(questions::get_by_id)
                .put(questions::edit)
                .delete(questions::delete),
        )
        .route("/{id}/appends", post(questions::append))
        .route(
            "/{id}/comments",
            get(questions::list_comments).post(questions::comment),
        )
        .route("/{id}/answers", post(questions::answer))
        .route("/{id}/votes", post(questions::vote))
}
