//! The question page read model.

use std::collections::HashMap;

use aristotle_core::lifecycle::{rank_answers, QuestionState, RankedAnswer};
use aristotle_core::listing::Pagination;
use aristotle_core::types::DbId;
use aristotle_core::voting::VoteTally;
use aristotle_db::models::answer::AnswerView;
use aristotle_db::models::post::{Append, Comment, PostKind};
use aristotle_db::models::question::QuestionSummary;
use aristotle_db::models::vote::QuestionVotes;
use aristotle_db::repositories::{AnswerRepo, AppendRepo, CommentRepo, QuestionRepo, VoteRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{not_found, LifecycleResult};

#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub question: QuestionSummary,
    pub state: QuestionState,
    pub votes: VoteTally,
    pub comments: Vec<Comment>,
    pub appends: Vec<Append>,
    /// One page of answers: accepted first, then by net score, then newest.
    pub answers: Vec<AnswerDetail>,
    pub answer_pagination: Pagination,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerDetail {
    #[serde(flatten)]
    pub answer: AnswerView,
    pub net_score: i64,
    pub comments: Vec<Comment>,
    pub appends: Vec<Append>,
}

fn group_by_target<T>(items: Vec<T>, target: impl Fn(&T) -> DbId) -> HashMap<DbId, Vec<T>> {
    let mut grouped: HashMap<DbId, Vec<T>> = HashMap::new();
    for item in items {
        grouped.entry(target(&item)).or_default().push(item);
    }
    grouped
}

/// Load everything shown on a question page.
///
/// When `viewer_key` is given, the view is counted once per viewer before
/// the aggregates are read. `answer_page` picks the page of ranked answers
/// from the answer count.
pub async fn question_detail(
    pool: &PgPool,
    question_id: DbId,
    viewer_key: Option<&str>,
    answer_page: impl FnOnce(i64) -> Pagination,
) -> LifecycleResult<QuestionDetail> {
    if QuestionRepo::find_by_id(pool, question_id).await?.is_none() {
        return Err(not_found("question", question_id));
    }
    if let Some(key) = viewer_key {
        QuestionRepo::record_hit(pool, question_id, key).await?;
    }

    let question = QuestionRepo::summary(pool, question_id)
        .await?
        .ok_or_else(|| not_found("question", question_id))?;
    let votes = VoteRepo::tally::<QuestionVotes>(pool, question_id).await?;
    let comments = CommentRepo::list_for(pool, PostKind::Question, &[question_id]).await?;
    let appends = AppendRepo::list_for(pool, PostKind::Question, &[question_id]).await?;

    let mut answer_rows = AnswerRepo::list_views_for_question(pool, question_id).await?;
    rank_answers(&mut answer_rows);

    let answer_pagination = answer_page(answer_rows.len() as i64);
    let answer_rows: Vec<AnswerView> = answer_rows
        .into_iter()
        .skip(answer_pagination.offset() as usize)
        .take(answer_pagination.limit() as usize)
        .collect();

    let answer_ids: Vec<DbId> = answer_rows.iter().map(|a| a.id).collect();
    let mut answer_comments = group_by_target(
        CommentRepo::list_for(pool, PostKind::Answer, &answer_ids).await?,
        |c| c.target_id,
    );
    let mut answer_appends = group_by_target(
        AppendRepo::list_for(pool, PostKind::Answer, &answer_ids).await?,
        |a| a.target_id,
    );

    let answers = answer_rows
        .into_iter()
        .map(|answer| AnswerDetail {
            net_score: answer.net_score(),
            comments: answer_comments.remove(&answer.id).unwrap_or_default(),
            appends: answer_appends.remove(&answer.id).unwrap_or_default(),
            answer,
        })
        .collect();

    Ok(QuestionDetail {
        state: QuestionState::from_solved(question.solved),
        question,
        votes,
        comments,
        appends,
        answers,
        answer_pagination,
    })
}
