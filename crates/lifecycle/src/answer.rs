//! Answer operations: answer, edit, append, comment, accept, delete.
//!
//! Accepting and deleting an answer also move the parent question between
//! open and solved, so both lock the answer and question rows together.

use aristotle_core::authorization::{require, Action, Actor, Target};
use aristotle_core::commands::{AnswerCommand, AppendCommand, CommentCommand};
use aristotle_core::lifecycle::{ensure_acceptable, solved_after_answer_deleted};
use aristotle_core::types::DbId;
use aristotle_core::validation::Valid;
use aristotle_db::models::answer::{Answer, LockedAnswer};
use aristotle_db::models::post::{Append, Comment, PostKind};
use aristotle_db::repositories::{AnswerRepo, AppendRepo, CommentRepo, QuestionRepo};
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{not_found, LifecycleResult};

const ENTITY: &str = "answer";

async fn lock_authorized(
    tx: &mut Transaction<'_, Postgres>,
    actor: &Actor,
    action: Action,
    answer_id: DbId,
) -> LifecycleResult<LockedAnswer> {
    let answer = AnswerRepo::lock_with_question(&mut **tx, answer_id)
        .await?
        .ok_or_else(|| not_found(ENTITY, answer_id))?;
    require(
        actor,
        action,
        &Target::Answer {
            author_id: answer.author_id,
            question_author_id: answer.question_author_id,
        },
    )?;
    Ok(answer)
}

/// Post an answer. Anyone may answer, including the question's author.
pub async fn answer_question(
    pool: &PgPool,
    actor: Actor,
    question_id: DbId,
    cmd: Valid<AnswerCommand>,
) -> LifecycleResult<Answer> {
    let mut tx = pool.begin().await?;

    let question = QuestionRepo::lock_by_id(&mut *tx, question_id)
        .await?
        .ok_or_else(|| not_found("question", question_id))?;
    require(
        &actor,
        Action::Answer,
        &Target::Question {
            author_id: question.author_id,
        },
    )?;

    let answer = AnswerRepo::create(&mut *tx, question_id, actor.user_id, &cmd.content).await?;

    tx.commit().await?;
    tracing::info!(
        question_id,
        answer_id = answer.id,
        user_id = actor.user_id,
        "Answer posted"
    );
    Ok(answer)
}

/// Replace the content of an answer, stamping `updated_at`.
pub async fn edit_answer(
    pool: &PgPool,
    actor: Actor,
    answer_id: DbId,
    cmd: Valid<AnswerCommand>,
) -> LifecycleResult<Answer> {
    let mut tx = pool.begin().await?;
    lock_authorized(&mut tx, &actor, Action::Edit, answer_id).await?;

    let answer = AnswerRepo::update_content(&mut *tx, answer_id, &cmd.content)
        .await?
        .ok_or_else(|| not_found(ENTITY, answer_id))?;

    tx.commit().await?;
    tracing::info!(answer_id, user_id = actor.user_id, "Answer edited");
    Ok(answer)
}

pub async fn append_to_answer(
    pool: &PgPool,
    actor: Actor,
    answer_id: DbId,
    cmd: Valid<AppendCommand>,
) -> LifecycleResult<Append> {
    let mut tx = pool.begin().await?;
    lock_authorized(&mut tx, &actor, Action::Append, answer_id).await?;

    let append = AppendRepo::create(&mut *tx, PostKind::Answer, answer_id, &cmd.content).await?;

    tx.commit().await?;
    tracing::info!(answer_id, append_id = append.id, "Answer append added");
    Ok(append)
}

pub async fn comment_on_answer(
    pool: &PgPool,
    actor: Actor,
    answer_id: DbId,
    cmd: Valid<CommentCommand>,
) -> LifecycleResult<Comment> {
    let mut tx = pool.begin().await?;
    lock_authorized(&mut tx, &actor, Action::Comment, answer_id).await?;

    let comment = CommentRepo::create(
        &mut *tx,
        PostKind::Answer,
        answer_id,
        actor.user_id,
        &cmd.content,
    )
    .await?;

    tx.commit().await?;
    tracing::info!(
        answer_id,
        comment_id = comment.id,
        user_id = actor.user_id,
        "Answer comment added"
    );
    Ok(comment)
}

/// Accept an answer and mark its question solved.
///
/// One-shot: fails with an unsupported transition, changing nothing, when
/// the question is already solved or the answer already accepted.
pub async fn accept_answer(pool: &PgPool, actor: Actor, answer_id: DbId) -> LifecycleResult<Answer> {
    let mut tx = pool.begin().await?;
    let locked = lock_authorized(&mut tx, &actor, Action::Accept, answer_id).await?;

    ensure_acceptable(locked.question_solved, locked.accepted)?;

    let answer = AnswerRepo::mark_accepted(&mut *tx, answer_id)
        .await?
        .ok_or_else(|| not_found(ENTITY, answer_id))?;
    QuestionRepo::set_solved(&mut *tx, locked.question_id, true).await?;

    tx.commit().await?;
    tracing::info!(
        answer_id,
        question_id = locked.question_id,
        user_id = actor.user_id,
        "Answer accepted"
    );
    Ok(answer)
}

/// Delete an answer. Deleting the accepted answer reopens the question.
pub async fn delete_answer(pool: &PgPool, actor: Actor, answer_id: DbId) -> LifecycleResult<()> {
    let mut tx = pool.begin().await?;
    let locked = lock_authorized(&mut tx, &actor, Action::Delete, answer_id).await?;

    AnswerRepo::delete(&mut *tx, answer_id).await?;

    let solved = solved_after_answer_deleted(locked.question_solved, locked.accepted);
    if solved != locked.question_solved {
        QuestionRepo::set_solved(&mut *tx, locked.question_id, solved).await?;
    }

    tx.commit().await?;
    tracing::info!(
        answer_id,
        question_id = locked.question_id,
        reopened = locked.question_solved && !solved,
        "Answer deleted"
    );
    Ok(())
}
