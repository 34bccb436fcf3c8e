//! Handlers for the `/questions` resource.

use aristotle_core::commands::{
    AnswerCommand, AppendCommand, AskQuestionCommand, CommentCommand, EditQuestionCommand,
};
use aristotle_core::error::CoreError;
use aristotle_core::types::DbId;
use aristotle_core::validation::Valid;
use aristotle_db::models::answer::Answer;
use aristotle_db::models::post::{Append, Comment, PostKind};
use aristotle_db::models::question::{Question, QuestionFilter, QuestionSummary};
use aristotle_db::models::vote::QuestionVotes;
use aristotle_db::repositories::{QuestionRepo, VoteRepo};
use aristotle_lifecycle::answer::answer_question;
use aristotle_lifecycle::detail::{question_detail, QuestionDetail};
use aristotle_lifecycle::question::{self, QuestionEdit};
use aristotle_lifecycle::vote::vote_question;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::AppResult;
use crate::handlers::comments::comment_page;
use crate::handlers::votes::{parse_direction, VoteRequest, VoteResponse};
use crate::middleware::auth::{AuthUser, Viewer};
use crate::query::ListParams;
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// GET /api/v1/questions?sort=&page=&pagesize=
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Page<QuestionSummary>>>> {
    let sort = params.sort();
    let total = QuestionRepo::count(&state.pool, QuestionFilter::All, sort).await?;
    let pagination = params.paginate(total, state.config.listing.question_page_size);
    let items = QuestionRepo::list(
        &state.pool,
        QuestionFilter::All,
        sort,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;
    Ok(Json(DataResponse {
        data: Page::new(items, pagination),
    }))
}

/// POST /api/v1/questions
pub async fn ask(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AskQuestionCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<Question>>)> {
    let cmd = Valid::new(input)?;
    let question = question::ask_question(&state.pool, user.actor(), cmd).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// GET /api/v1/questions/{id}?page=&pagesize=
///
/// Counts the view once per signed-in user or `x-session-id`. The page
/// parameters select the page of ranked answers.
pub async fn get_by_id(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<QuestionDetail>>> {
    let answer_page_size = state.config.listing.answer_page_size;
    let detail = question_detail(&state.pool, id, viewer.key.as_deref(), |total| {
        params.paginate(total, answer_page_size)
    })
    .await?;
    Ok(Json(DataResponse { data: detail }))
}

/// PUT /api/v1/questions/{id}
pub async fn edit(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<EditQuestionCommand>,
) -> AppResult<Json<DataResponse<QuestionEdit>>> {
    let cmd = Valid::new(input)?;
    let edit = question::edit_question(&state.pool, user.actor(), id, cmd).await?;
    Ok(Json(DataResponse { data: edit }))
}

/// DELETE /api/v1/questions/{id}
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    question::delete_question(&state.pool, user.actor(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/questions/{id}/appends
pub async fn append(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AppendCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<Append>>)> {
    let cmd = Valid::new(input)?;
    let append = question::append_to_question(&state.pool, user.actor(), id, cmd).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: append })))
}

/// GET /api/v1/questions/{id}/comments?page=&pagesize=
pub async fn list_comments(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Page<Comment>>>> {
    if QuestionRepo::find_by_id(&state.pool, id).await?.is_none() {
        return Err(CoreError::NotFound {
            entity: "question",
            id,
        }
        .into());
    }
    let page = comment_page(&state, PostKind::Question, id, &params).await?;
    Ok(Json(DataResponse { data: page }))
}

/// POST /api/v1/questions/{id}/comments
pub async fn comment(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<CommentCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<Comment>>)> {
    let cmd = Valid::new(input)?;
    let comment = question::comment_on_question(&state.pool, user.actor(), id, cmd).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: comment })))
}

/// POST /api/v1/questions/{id}/answers
pub async fn answer(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AnswerCommand>,
) -> AppResult<(StatusCode, Json<DataResponse<Answer>>)> {
    let cmd = Valid::new(input)?;
    let answer = answer_question(&state.pool, user.actor(), id, cmd).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: answer })))
}

/// POST /api/v1/questions/{id}/votes
pub async fn vote(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<VoteRequest>,
) -> AppResult<Json<DataResponse<VoteResponse>>> {
    let direction = parse_direction(&input)?;
    let outcome = vote_question(&state.pool, user.actor(), id, direction).await?;
    let votes = VoteRepo::tally::<QuestionVotes>(&state.pool, id).await?;
    Ok(Json(DataResponse {
        data: VoteResponse::new(outcome, votes),
    }))
}
