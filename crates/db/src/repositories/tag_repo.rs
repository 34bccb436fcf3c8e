//! Repository for the `tags` table.

use aristotle_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::tag::TagCount;

pub struct TagRepo;

impl TagRepo {
    /// Tag names on a question, alphabetical.
    pub async fn names_for_question<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        sqlx::query_scalar("SELECT name FROM tags WHERE question_id = $1 ORDER BY name ASC")
            .bind(question_id)
            .fetch_all(executor)
            .await
    }

    /// Attach names to a question. Names already present are skipped.
    pub async fn insert_names<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
        names: &[String],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO tags (question_id, name)
             SELECT $1, UNNEST($2::TEXT[])
             ON CONFLICT ON CONSTRAINT uq_tags_question_name DO NOTHING",
        )
        .bind(question_id)
        .bind(names)
        .execute(executor)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete_names<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
        names: &[String],
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tags WHERE question_id = $1 AND name = ANY($2)")
            .bind(question_id)
            .bind(names)
            .execute(executor)
            .await?;
        Ok(result.rows_affected())
    }

    /// One page of distinct tag names with their question counts.
    pub async fn list_counts<'e>(
        executor: impl PgExecutor<'e>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TagCount>, sqlx::Error> {
        sqlx::query_as::<_, TagCount>(
            "SELECT name, COUNT(*) AS questions_count
             FROM tags
             GROUP BY name
             ORDER BY name ASC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
    }

    pub async fn count_distinct<'e>(executor: impl PgExecutor<'e>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(DISTINCT name) FROM tags")
            .fetch_one(executor)
            .await
    }
}
