//! Read-only listings: home page, tags, questions by tag, users and search.

use aristotle_core::listing::{Pagination, QuestionSort};
use aristotle_core::types::{DbId, Timestamp};
use aristotle_db::models::question::{QuestionFilter, QuestionSummary};
use aristotle_db::models::tag::TagCount;
use aristotle_db::repositories::{QuestionRepo, TagRepo, UserRepo};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use crate::error::AppResult;
use crate::query::{ListParams, SearchParams};
use crate::response::{DataResponse, Page};
use crate::state::AppState;

/// A row of the public user list.
#[derive(Debug, Serialize)]
pub struct UserListItem {
    pub id: DbId,
    pub username: String,
    pub avatar_url: String,
    pub created_at: Timestamp,
}

/// GET /api/v1/home
///
/// The newest questions, one page of `home_page_size`.
pub async fn home(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Page<QuestionSummary>>>> {
    let sort = QuestionSort::Newest;
    let total = QuestionRepo::count(&state.pool, QuestionFilter::All, sort).await?;
    let pagination = Pagination::resolve(None, None, total, state.config.listing.home_page_size);
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

/// GET /api/v1/tags?page=&pagesize=
pub async fn tags(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Page<TagCount>>>> {
    let total = TagRepo::count_distinct(&state.pool).await?;
    let pagination = params.paginate(total, state.config.listing.tag_page_size);
    let items = TagRepo::list_counts(&state.pool, pagination.limit(), pagination.offset()).await?;
    Ok(Json(DataResponse {
        data: Page::new(items, pagination),
    }))
}

/// GET /api/v1/tags/{name}/questions?sort=&page=&pagesize=
pub async fn tagged_questions(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Page<QuestionSummary>>>> {
    let sort = params.sort();
    let filter = QuestionFilter::Tagged(&name);
    let total = QuestionRepo::count(&state.pool, filter, sort).await?;
    let pagination = params.paginate(total, state.config.listing.question_page_size);
    let items = QuestionRepo::list(
        &state.pool,
        filter,
        sort,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;
    Ok(Json(DataResponse {
        data: Page::new(items, pagination),
    }))
}

/// GET /api/v1/users?page=&pagesize=
pub async fn users(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<DataResponse<Page<UserListItem>>>> {
    let listing = &state.config.listing;
    let total = UserRepo::count(&state.pool).await?;
    let pagination = params.paginate(total, listing.user_page_size);
    let items = UserRepo::list_page(&state.pool, pagination.limit(), pagination.offset())
        .await?
        .into_iter()
        .map(|u| UserListItem {
            id: u.id,
            avatar_url: listing.avatar_url(u.avatar.as_deref()),
            username: u.username,
            created_at: u.created_at,
        })
        .collect();
    Ok(Json(DataResponse {
        data: Page::new(items, pagination),
    }))
}

/// GET /api/v1/search?query=&page=&pagesize=
///
/// Case-sensitive substring match on title or content. A blank query
/// matches nothing.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<DataResponse<Page<QuestionSummary>>>> {
    let default_size = state.config.listing.user_page_size;
    let needle = params.query.trim();
    if needle.is_empty() {
        let pagination = params.paginate(0, default_size);
        return Ok(Json(DataResponse {
            data: Page::new(Vec::new(), pagination),
        }));
    }

    let sort = QuestionSort::Newest;
    let filter = QuestionFilter::Containing(needle);
    let total = QuestionRepo::count(&state.pool, filter, sort).await?;
    let pagination = params.paginate(total, default_size);
    let items = QuestionRepo::list(
        &state.pool,
        filter,
        sort,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;
    tracing::debug!(query = needle, total, "Search");
    Ok(Json(DataResponse {
        data: Page::new(items, pagination),
    }))
}
