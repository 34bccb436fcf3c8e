//! Paged comment listings shared by questions and answers.

use aristotle_core::types::DbId;
use aristotle_db::models::post::{Comment, PostKind};
use aristotle_db::repositories::CommentRepo;

use crate::error::AppResult;
use crate::query::ListParams;
use crate::response::Page;
use crate::state::AppState;

/// One page of comments on a post, oldest first, sized by
/// `comment_page_size` unless `?pagesize=` overrides it.
///
/// The caller checks that the post exists.
pub(crate) async fn comment_page(
    state: &AppState,
    kind: PostKind,
    target_id: DbId,
    params: &ListParams,
) -> AppResult<Page<Comment>> {
    let total = CommentRepo::count_for(&state.pool, kind, target_id).await?;
    let pagination = params.paginate(total, state.config.listing.comment_page_size);
    let items = CommentRepo::list_page(
        &state.pool,
        kind,
        target_id,
        pagination.limit(),
        pagination.offset(),
    )
    .await?;
    Ok(Page::new(items, pagination))
}
