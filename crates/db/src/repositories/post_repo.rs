//! Repositories for comments and appends on questions and answers.
//!
//! Both tables come in a question flavour and an answer flavour with the
//! same shape; [`PostKind`] picks the table and parent column.

use aristotle_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::post::{Append, Comment, PostKind};

pub struct CommentRepo;

impl CommentRepo {
    /// Insert a comment, returning it with the author's name.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        kind: PostKind,
        target_id: DbId,
        author_id: DbId,
        content: &str,
    ) -> Result<Comment, sqlx::Error> {
        let table = kind.comment_table();
        let parent = kind.parent_column();
        let query = format!(
            "WITH inserted AS (
                INSERT INTO {table} ({parent}, author_id, content)
                VALUES ($1, $2, $3)
                RETURNING id, {parent}, author_id, content, created_at
             )
             SELECT i.id, i.{parent} AS target_id, i.author_id, u.username AS author_name,
                    i.content, i.created_at
             FROM inserted i
             JOIN users u ON u.id = i.author_id"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(target_id)
            .bind(author_id)
            .bind(content)
            .fetch_one(executor)
            .await
    }

    /// Comments on any of `target_ids`, oldest first.
    pub async fn list_for<'e>(
        executor: impl PgExecutor<'e>,
        kind: PostKind,
        target_ids: &[DbId],
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let table = kind.comment_table();
        let parent = kind.parent_column();
        let query = format!(
            "SELECT c.id, c.{parent} AS target_id, c.author_id, u.username AS author_name,
                    c.content, c.created_at
             FROM {table} c
             JOIN users u ON u.id = c.author_id
             WHERE c.{parent} = ANY($1)
             ORDER BY c.created_at ASC, c.id ASC"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(target_ids)
            .fetch_all(executor)
            .await
    }

    /// One page of comments on a single post, oldest first.
    pub async fn list_page<'e>(
        executor: impl PgExecutor<'e>,
        kind: PostKind,
        target_id: DbId,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Comment>, sqlx::Error> {
        let table = kind.comment_table();
        let parent = kind.parent_column();
        let query = format!(
            "SELECT c.id, c.{parent} AS target_id, c.author_id, u.username AS author_name,
                    c.content, c.created_at
             FROM {table} c
             JOIN users u ON u.id = c.author_id
             WHERE c.{parent} = $1
             ORDER BY c.created_at ASC, c.id ASC
             LIMIT $2 OFFSET $3"
        );
        sqlx::query_as::<_, Comment>(&query)
            .bind(target_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(executor)
            .await
    }

    pub async fn count_for<'e>(
        executor: impl PgExecutor<'e>,
        kind: PostKind,
        target_id: DbId,
    ) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM {} WHERE {} = $1",
            kind.comment_table(),
            kind.parent_column()
        );
        sqlx::query_scalar(&query)
            .bind(target_id)
            .fetch_one(executor)
            .await
    }
}

pub struct AppendRepo;

impl AppendRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        kind: PostKind,
        target_id: DbId,
        content: &str,
    ) -> Result<Append, sqlx::Error> {
        let table = kind.append_table();
        let parent = kind.parent_column();
        let query = format!(
            "INSERT INTO {table} ({parent}, content)
             VALUES ($1, $2)
             RETURNING id, {parent} AS target_id, content, created_at"
        );
        sqlx::query_as::<_, Append>(&query)
            .bind(target_id)
            .bind(content)
            .fetch_one(executor)
            .await
    }

    /// Appends on any of `target_ids`, in the order they were added.
    pub async fn list_for<'e>(
        executor: impl PgExecutor<'e>,
        kind: PostKind,
        target_ids: &[DbId],
    ) -> Result<Vec<Append>, sqlx::Error> {
        let table = kind.append_table();
        let parent = kind.parent_column();
        let query = format!(
            "SELECT id, {parent} AS target_id, content, created_at
             FROM {table}
             WHERE {parent} = ANY($1)
             ORDER BY created_at ASC, id ASC"
        );
        sqlx::query_as::<_, Append>(&query)
            .bind(target_ids)
            .fetch_all(executor)
            .await
    }
}
