//! Repository for the `answers` table.

use aristotle_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::answer::{Answer, AnswerView, AuthoredAnswer, LockedAnswer};

const COLUMNS: &str = "id, question_id, author_id, content, accepted, accepted_at, \
                       created_at, updated_at";

pub struct AnswerRepo;

impl AnswerRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
        author_id: DbId,
        content: &str,
    ) -> Result<Answer, sqlx::Error> {
        let query = format!(
            "INSERT INTO answers (question_id, author_id, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(question_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM answers WHERE id = $1");
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Lock an answer and its question row together.
    ///
    /// Accepting or deleting an answer changes the question's `solved` flag,
    /// so both rows stay locked until the transaction ends.
    pub async fn lock_with_question<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<LockedAnswer>, sqlx::Error> {
        sqlx::query_as::<_, LockedAnswer>(
            "SELECT a.id, a.question_id, a.author_id, a.accepted,
                    q.author_id AS question_author_id, q.solved AS question_solved
             FROM answers a
             JOIN questions q ON q.id = a.question_id
             WHERE a.id = $1
             FOR UPDATE",
        )
        .bind(id)
        .fetch_optional(executor)
        .await
    }

    /// Replace the content, stamping `updated_at`.
    pub async fn update_content<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        content: &str,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!(
            "UPDATE answers SET content = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .bind(content)
            .fetch_optional(executor)
            .await
    }

    pub async fn mark_accepted<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Answer>, sqlx::Error> {
        let query = format!(
            "UPDATE answers SET accepted = TRUE, accepted_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Answer>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Delete an answer with its comments, appends and votes.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM answers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// All answers of a question with author names and vote counts, in
    /// insertion order. Display ranking happens in the caller.
    pub async fn list_views_for_question<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
    ) -> Result<Vec<AnswerView>, sqlx::Error> {
        sqlx::query_as::<_, AnswerView>(
            "SELECT a.id, a.question_id, a.author_id, u.username AS author_name,
                    a.content, a.accepted, a.accepted_at, a.created_at, a.updated_at,
                    COUNT(v.id) FILTER (WHERE v.direction = 'up') AS up_votes,
                    COUNT(v.id) FILTER (WHERE v.direction = 'down') AS down_votes
             FROM answers a
             JOIN users u ON u.id = a.author_id
             LEFT JOIN answer_votes v ON v.answer_id = a.id
             WHERE a.question_id = $1
             GROUP BY a.id, u.username
             ORDER BY a.id ASC",
        )
        .bind(question_id)
        .fetch_all(executor)
        .await
    }

    /// Answers written by a user, newest first.
    pub async fn list_by_author<'e>(
        executor: impl PgExecutor<'e>,
        author_id: DbId,
    ) -> Result<Vec<AuthoredAnswer>, sqlx::Error> {
        sqlx::query_as::<_, AuthoredAnswer>(
            "SELECT a.id, a.question_id, q.title AS question_title,
                    a.content, a.accepted, a.created_at
             FROM answers a
             JOIN questions q ON q.id = a.question_id
             WHERE a.author_id = $1
             ORDER BY a.created_at DESC, a.id DESC",
        )
        .bind(author_id)
        .fetch_all(executor)
        .await
    }
}
