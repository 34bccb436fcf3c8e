//! Repository for the `users` table.

use aristotle_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user::{CreateUser, User, UserSummary};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, username, email, password_hash, first_name, last_name, \
                       is_active, last_login_at, created_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new, not yet activated user, returning the created row.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        input: &CreateUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (username, email, password_hash)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.username)
            .bind(&input.email)
            .bind(&input.password_hash)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by username (case-sensitive).
    pub async fn find_by_username<'e>(
        executor: impl PgExecutor<'e>,
        username: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE username = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(username)
            .fetch_optional(executor)
            .await
    }

    /// Find a user by email (case-sensitive).
    pub async fn find_by_email<'e>(
        executor: impl PgExecutor<'e>,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    /// One page of the public user list, oldest account first.
    pub async fn list_page<'e>(
        executor: impl PgExecutor<'e>,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<UserSummary>, sqlx::Error> {
        sqlx::query_as::<_, UserSummary>(
            "SELECT u.id, u.username, m.avatar, u.created_at
             FROM users u
             LEFT JOIN members m ON m.user_id = u.id
             ORDER BY u.id ASC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(executor)
        .await
    }

    pub async fn count<'e>(executor: impl PgExecutor<'e>) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(executor)
            .await
    }

    /// Change username and email. Returns `None` if the user does not exist.
    pub async fn update_account<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        username: &str,
        email: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!(
            "UPDATE users SET username = $2, email = $3
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(username)
            .bind(email)
            .fetch_optional(executor)
            .await
    }

    pub async fn update_names<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        first_name: &str,
        last_name: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET first_name = $2, last_name = $3 WHERE id = $1")
            .bind(id)
            .bind(first_name)
            .bind(last_name)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Update a user's password hash. Returns `true` if the row was updated.
    pub async fn update_password<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
        password_hash: &str,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE users SET password_hash = $2 WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn activate<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET is_active = TRUE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }

    /// Set `last_login_at` to now.
    pub async fn record_login<'e>(
        executor: impl PgExecutor<'e>,
        id: DbId,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE users SET last_login_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
