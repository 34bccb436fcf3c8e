//! Handlers for the `/answers` resource.

use aristotle_core::commands::{AnswerCommand, AppendCommand, CommentCommand};
use aristotle_core::error::CoreError;
use aristotle_core::types::DbId;
use aristotle_core::validation::Valid;
use aristotle_db::models::answer::Answer;
use aristotle_db::models::post::{Append, Comment, PostKind};
use aristotle_db::models::vote::AnswerVotes;
use aristotle_db::repositories::{AnswerRepo, VoteRepo};
use aristotle_lifecycle::answer::{
    accept_answer, append_to_answer, comment_on_answer, delete_answer, edit_answer,
};
use aristotle_lifecycle::vote::vote_answer;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::comments::comment_page;
use crate::handlers::votes::{parse_direction, VoteRequest, VoteResponse};
use crate::middleware::auth::AuthUser;
use crate::query::ListParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// PUT /api/v1/answers/{id}
pub async fn edit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AnswerCommand>,
) -> AppResult<Json<DataResponse<Answer>>> {
    let cmd = Valid::new(input)?;
    let answer = edit_answer(&state.pool, user.actor(), id, cmd).await?;
    Ok(Json(DataResponse { data: answer }))
}

/// DELETE /api/v1/answers/{id}
///
/// Deleting the accepted answer reopens its question.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    delete_answer(&state.pool, user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/answers/{id}/accept
pub async fn accept(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<Answer>>> {
    let answer = accept_answer(&state.pool, user.actor(), id).await?;
    Ok(Json(DataResponse { data: answer }))
}

/// POST /api/v1/answers/{id}/appends
pub async fn append(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AppendCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<Append>>)> {
    let cmd = Valid::new(input)?;
    let append = append_to_answer(&state.pool, user.actor(), id, cmd).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: append })))
}

/// GET /api/v1/answers/{id}/comments?page=&pagesize=
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Page<Comment>>>> {
    if AnswerRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::NotFound { entity: "answer", id }.into());
    }
    let page = comment_page(&state, PostKind::Answer, id, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/answers/{id}/comments
pub async fn comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let cmd = Valid::new(input)?;
    let comment = comment_on_answer(&state.pool, user.actor(), id, cmd).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// POST /api/v1/answers/{id}/votes
pub async fn vote(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<Json<DataResponse<VoteResponse>>> {
    let direction = parse_direction(&input)?;
    let outcome = vote_answer(&state.pool, user.actor(), id, direction).await?;
    let votes = VoteRepo::tally::<AnswerVotes>(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: VoteResponse::new(outcome, votes),
    }))
}
