//! Repository for the `questions` and `question_hits` tables, plus the
//! aggregate queries behind every question listing.

use aristotle_core::listing::QuestionSort;
use aristotle_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::question::{CreateQuestion, Question, QuestionFilter, QuestionSummary};

const COLUMNS: &str = "id, author_id, title, content, solved, created_at, updated_at";

/// One row per question with its listing aggregates. Wrapped as a subquery
/// so filters and ORDER BY can use the aggregate names directly.
const SUMMARY_SELECT: &str = "SELECT q.id, q.author_id, u.username AS author_name, \
    q.title, q.content, q.solved, q.created_at, q.updated_at, \
    (SELECT COUNT(*) FROM answers a WHERE a.question_id = q.id) AS answers_count, \
    (SELECT COUNT(*) FROM question_votes v WHERE v.question_id = q.id) AS votes_count, \
    (SELECT COUNT(*) FILTER (WHERE v.direction = 'up') \
          - COUNT(*) FILTER (WHERE v.direction = 'down') \
       FROM question_votes v WHERE v.question_id = q.id) AS net_score, \
    (SELECT COUNT(*) FROM question_hits h WHERE h.question_id = q.id) AS hits_count, \
    COALESCE((SELECT array_agg(t.name ORDER BY t.name) FROM tags t \
              WHERE t.question_id = q.id), ARRAY[]::TEXT[]) AS tags \
    FROM questions q JOIN users u ON u.id = q.author_id";

/// ORDER BY clause for a listing sort key.
fn order_clause(sort: QuestionSort) -> &'static str {
    match sort {
        QuestionSort::Newest => "s.created_at DESC, s.id DESC",
        QuestionSort::Votes => "s.net_score DESC, s.created_at DESC, s.id DESC",
        QuestionSort::Answers => "s.solved DESC, s.answers_count DESC, s.created_at DESC, s.id DESC",
        QuestionSort::Unanswered => "s.answers_count ASC, s.net_score ASC, s.created_at ASC, s.id ASC",
        QuestionSort::Views => "s.hits_count DESC, s.created_at DESC, s.id DESC",
    }
}

/// WHERE clause for a filter and sort. Uses `$1` when the filter binds a value.
fn where_clause(filter: &QuestionFilter<'_>, sort: QuestionSort) -> String {
    let mut conditions: Vec<&str> = Vec::new();
    match filter {
        QuestionFilter::All => {}
        QuestionFilter::Tagged(_) => conditions
            .push("EXISTS (SELECT 1 FROM tags t WHERE t.question_id = s.id AND t.name = $1)"),
        QuestionFilter::Containing(_) => {
            conditions.push("(strpos(s.title, $1) > 0 OR strpos(s.content, $1) > 0)")
        }
        QuestionFilter::AuthoredBy(_) => conditions.push("s.author_id = $1"),
    }
    if sort.unsolved_only() {
        conditions.push("NOT s.solved");
    }
    if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    }
}

/// Number of bind parameters the filter consumes.
fn filter_params(filter: &QuestionFilter<'_>) -> usize {
    match filter {
        QuestionFilter::All => 0,
        _ => 1,
    }
}

pub struct QuestionRepo;

impl QuestionRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateQuestion<'_>,
    ) -> Result<Question, sqlx::Error> {
        let query = format!(
            "INSERT INTO questions (author_id, title, content)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(input.author_id)
            .bind(input.title)
            .bind(input.content)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Fetch a question and hold a row lock until the transaction ends.
    pub async fn lock_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM questions WHERE id = $1 FOR UPDATE");
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Replace title and content, stamping `updated_at`.
    pub async fn update_content<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        title: &str,
        content: &str,
    ) -> Result<Option<Question>, sqlx::Error> {
        let query = format!(
            "UPDATE questions SET title = $2, content = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Question>(&query)
            .bind(id)
            .bind(title)
            .bind(content)
            .fetch_optional(executor)
            .await
    }

    pub async fn set_solved<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        solved: bool,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE questions SET solved = $2 WHERE id = $1")
            .bind(id)
            .bind(solved)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Delete a question; answers, comments, appends, votes, tags and hits
    /// go with it. Returns `true` if a row was removed.
    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM questions WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn summary<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<QuestionSummary>, sqlx::Error> {
        let query = format!("SELECT * FROM ({SUMMARY_SELECT}) s WHERE s.id = $1");
        sqlx::query_as::<_, QuestionSummary>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// One page of questions matching `filter`, ordered by `sort`.
    pub async fn list<'e>(
        executor: impl PgExecutor<'e>,
        filter: QuestionFilter<'_>,
        sort: QuestionSort,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<QuestionSummary>, sqlx::Error> {
        let next = filter_params(&filter) + 1;
        let query = format!(
            "SELECT * FROM ({SUMMARY_SELECT}) s {} ORDER BY {} LIMIT ${} OFFSET ${}",
            where_clause(&filter, sort),
            order_clause(sort),
            next,
            next + 1,
        );
        let mut q = sqlx::query_as::<_, QuestionSummary>(&query);
        q = match filter {
            QuestionFilter::All => q,
            QuestionFilter::Tagged(value) | QuestionFilter::Containing(value) => q.bind(value),
            QuestionFilter::AuthoredBy(author_id) => q.bind(author_id),
        };
        q.bind(limit).bind(offset).fetch_all(executor).await
    }

    /// Total rows [`list`](Self::list) would page through.
    pub async fn count<'e>(
        executor: impl PgExecutor<'e>,
        filter: QuestionFilter<'_>,
        sort: QuestionSort,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM (SELECT q.id, q.author_id, q.title, q.content, q.solved \
             FROM questions q) s {}",
            where_clause(&filter, sort),
        );
        let q = sqlx::query_scalar::<_, i64>(&query);
        let q = match filter {
            QuestionFilter::All => q,
            QuestionFilter::Tagged(value) | QuestionFilter::Containing(value) => q.bind(value),
            QuestionFilter::AuthoredBy(author_id) => q.bind(author_id),
        };
        q.fetch_one(executor).await
    }

    /// Record one view per viewer. Returns `true` for a first view.
    pub async fn record_hit<'e>(
        executor: impl PgExecutor<'e>,
        question_id: DbId,
        viewer_key: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO question_hits (question_id, viewer_key)
             VALUES ($1, $2)
             ON CONFLICT ON CONSTRAINT uq_question_hits_question_viewer DO NOTHING",
        )
        .bind(question_id)
        .bind(viewer_key)
        .execute(executor)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
