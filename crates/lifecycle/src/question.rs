//! Question operations: ask, edit, append, comment, delete.

use aristotle_core::authorization::{require, Action, Actor, Target};
use aristotle_core::commands::{AppendCommand, AskQuestionCommand, CommentCommand, EditQuestionCommand};
use aristotle_core::tags::{parse_tag_list, TagDelta};
use aristotle_core::types::DbId;
use aristotle_core::validation::Valid;
use aristotle_db::models::post::{Append, Comment, PostKind};
use aristotle_db::models::question::{CreateQuestion, Question};
use aristotle_db::repositories::{AppendRepo, CommentRepo, QuestionRepo, TagRepo};
use serde::Serialize;
use sqlx::{PgPool, Postgres, Transaction};

use crate::error::{not_found, LifecycleResult};
use crate::tags::reconcile_tags;

const ENTITY: &str = "question";

/// Result of an edit: the updated row and the tag changes applied.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionEdit {
    pub question: Question,
    pub tags: TagDelta,
}

/// Lock a question and check that `actor` may perform `action` on it.
async fn lock_authorized(
    tx: &mut Transaction<'_, Postgres>,
    actor: &Actor,
    action: Action,
    question_id: DbId,
) -> LifecycleResult<Question> {
    let question = QuestionRepo::lock_by_id(&mut **tx, question_id)
        .await?
        .ok_or_else(|| not_found(ENTITY, question_id))?;
    require(
        actor,
        action,
        &Target::Question {
            author_id: question.author_id,
        },
    )?;
    Ok(question)
}

/// Post a new, unsolved question with its initial tags.
pub async fn ask_question(
    pool: &PgPool,
    actor: Actor,
    cmd: Valid<AskQuestionCommand>,
) -> LifecycleResult<Question> {
    let mut tx = pool.begin().await?;

    let question = QuestionRepo::create(
        &mut *tx,
        &CreateQuestion {
            author_id: actor.user_id,
            title: &cmd.title,
            content: &cmd.content,
        },
    )
    .await?;

    let tags: Vec<String> = cmd
        .tags
        .as_deref()
        .map(parse_tag_list)
        .unwrap_or_default()
        .into_iter()
        .collect();
    if !tags.is_empty() {
        TagRepo::insert_names(&mut *tx, question.id, &tags).await?;
    }

    tx.commit().await?;
    tracing::info!(
        question_id = question.id,
        user_id = actor.user_id,
        tags = tags.len(),
        "Question asked"
    );
    Ok(question)
}

/// Edit title and content. Tags are reconciled only when the command
/// carries a tag list.
pub async fn edit_question(
    pool: &PgPool,
    actor: Actor,
    question_id: DbId,
    cmd: Valid<EditQuestionCommand>,
) -> LifecycleResult<QuestionEdit> {
    let mut tx = pool.begin().await?;
    lock_authorized(&mut tx, &actor, Action::Edit, question_id).await?;

    let question = QuestionRepo::update_content(&mut *tx, question_id, &cmd.title, &cmd.content)
        .await?
        .ok_or_else(|| not_found(ENTITY, question_id))?;

    let tags = match cmd.tags.as_deref() {
        Some(input) => reconcile_tags(&mut tx, question_id, input).await?,
        None => TagDelta::default(),
    };

    tx.commit().await?;
    tracing::info!(question_id, user_id = actor.user_id, "Question edited");
    Ok(QuestionEdit { question, tags })
}

/// Add supplementary text. Leaves `updated_at` untouched.
pub async fn append_to_question(
    pool: &PgPool,
    actor: Actor,
    question_id: DbId,
    cmd: Valid<AppendCommand>,
) -> LifecycleResult<Append> {
    let mut tx = pool.begin().await?;
    lock_authorized(&mut tx, &actor, Action::Append, question_id).await?;

    let append = AppendRepo::create(&mut *tx, PostKind::Question, question_id, &cmd.content).await?;

    tx.commit().await?;
    tracing::info!(question_id, append_id = append.id, "Question append added");
    Ok(append)
}

pub async fn comment_on_question(
    pool: &PgPool,
    actor: Actor,
    question_id: DbId,
    cmd: Valid<CommentCommand>,
) -> LifecycleResult<Comment> {
    let mut tx = pool.begin().await?;
    lock_authorized(&mut tx, &actor, Action::Comment, question_id).await?;

    let comment = CommentRepo::create(
        &mut *tx,
        PostKind::Question,
        question_id,
        actor.user_id,
        &cmd.content,
    )
    .await?;

    tx.commit().await?;
    tracing::info!(
        question_id,
        comment_id = comment.id,
        user_id = actor.user_id,
        "Question comment added"
    );
    Ok(comment)
}

/// Delete a question together with everything attached to it.
pub async fn delete_question(pool: &PgPool, actor: Actor, question_id: DbId) -> LifecycleResult<()> {
    let mut tx = pool.begin().await?;
    lock_authorized(&mut tx, &actor, Action::Delete, question_id).await?;

    QuestionRepo::delete(&mut *tx, question_id).await?;

    tx.commit().await?;
    tracing::info!(question_id, user_id = actor.user_id, "Question deleted");
    Ok(())
}
