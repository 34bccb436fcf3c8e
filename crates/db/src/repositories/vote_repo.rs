//! Repository for `question_votes` and `answer_votes`.

use aristotle_core::authorization::Target;
use aristotle_core::types::DbId;
use aristotle_core::voting::{VoteDirection, VoteTally};
use sqlx::PgExecutor;

use crate::models::vote::{Vote, VoteTarget};

pub struct VoteRepo;

impl VoteRepo {
    /// Lock the voted-on row and return its ownership facts. `None` if it
    /// is missing.
    pub async fn lock_target<'e, T: VoteTarget>(
        executor: impl PgExecutor<'e>,
        target_id: DbId,
    ) -> Result<Option<Target>, sqlx::Error> {
        let row: Option<(DbId, DbId)> = sqlx::query_as(T::LOCK_QUERY)
            .bind(target_id)
            .fetch_optional(executor)
            .await?;
        Ok(row.map(|(author_id, question_author_id)| T::target(author_id, question_author_id)))
    }

    /// The voter's current vote on a target, locked for the transaction.
    pub async fn find_for_update<'e, T: VoteTarget>(
        executor: impl PgExecutor<'e>,
        target_id: DbId,
        voter_id: DbId,
    ) -> Result<Option<Vote>, sqlx::Error> {
        let query = format!(
            "SELECT id, {col} AS target_id, voter_id, direction, created_at
             FROM {table}
             WHERE {col} = $1 AND voter_id = $2
             FOR UPDATE",
            col = T::TARGET_COLUMN,
            table = T::VOTE_TABLE,
        );
        sqlx::query_as::<_, Vote>(&query)
            .bind(target_id)
            .bind(voter_id)
            .fetch_optional(executor)
            .await
    }

    /// Insert a vote unless one already exists for (target, voter).
    ///
    /// Returns `false` when a concurrent request inserted first.
    pub async fn insert<'e, T: VoteTarget>(
        executor: impl PgExecutor<'e>,
        target_id: DbId,
        voter_id: DbId,
        direction: VoteDirection,
    ) -> Result<bool, sqlx::Error> {
        let query = format!(
            "INSERT INTO {table} ({col}, voter_id, direction)
             VALUES ($1, $2, $3)
             ON CONFLICT ({col}, voter_id) DO NOTHING",
            col = T::TARGET_COLUMN,
            table = T::VOTE_TABLE,
        );
        let result = sqlx::query(&query)
            .bind(target_id)
            .bind(voter_id)
            .bind(direction.as_str())
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn delete<'e, T: VoteTarget>(
        executor: impl PgExecutor<'e>,
        vote_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let query = format!("DELETE FROM {} WHERE id = $1", T::VOTE_TABLE);
        let result = sqlx::query(&query)
            .bind(vote_id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Up and down counts for one target.
    pub async fn tally<'e, T: VoteTarget>(
        executor: impl PgExecutor<'e>,
        target_id: DbId,
    ) -> Result<VoteTally, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FILTER (WHERE direction = 'up'),
                    COUNT(*) FILTER (WHERE direction = 'down')
             FROM {} WHERE {} = $1",
            T::VOTE_TABLE,
            T::TARGET_COLUMN,
        );
        let (up, down): (i64, i64) = sqlx::query_as(&query)
            .bind(target_id)
            .fetch_one(executor)
            .await?;
        Ok(VoteTally { up, down })
    }
}
