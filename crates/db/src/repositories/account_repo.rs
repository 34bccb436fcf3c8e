//! Repositories for the `activations` and `password_resets` tables.

use aristotle_core::types::{DbId, Timestamp};
use sqlx::PgExecutor;

use crate::models::account::{Activation, PasswordReset};

const ACTIVATION_COLUMNS: &str = "id, user_id, code, is_active, expires_at";
const RESET_COLUMNS: &str = "id, user_id, code, expires_at";

pub struct ActivationRepo;

impl ActivationRepo {
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<Activation, sqlx::Error> {
        let query = format!(
            "INSERT INTO activations (user_id, code, expires_at)
             VALUES ($1, $2, $3)
             RETURNING {ACTIVATION_COLUMNS}"
        );
        sqlx::query_as::<_, Activation>(&query)
            .bind(user_id)
            .bind(code)
            .bind(expires_at)
            .fetch_one(executor)
            .await
    }

    /// Find an activation by code, locking it against concurrent use.
    pub async fn find_by_code_for_update<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<Activation>, sqlx::Error> {
        let query =
            format!("SELECT {ACTIVATION_COLUMNS} FROM activations WHERE code = $1 FOR UPDATE");
        sqlx::query_as::<_, Activation>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    pub async fn mark_used<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE activations SET is_active = TRUE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}

pub struct PasswordResetRepo;

impl PasswordResetRepo {
    /// Store a fresh code for `user_id`, replacing any earlier one.
    pub async fn replace_for_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        code: &str,
        expires_at: Timestamp,
    ) -> Result<PasswordReset, sqlx::Error> {
        let query = format!(
            "INSERT INTO password_resets (user_id, code, expires_at)
             VALUES ($1, $2, $3)
             ON CONFLICT (user_id) DO UPDATE
                SET code = EXCLUDED.code, expires_at = EXCLUDED.expires_at
             RETURNING {RESET_COLUMNS}"
        );
        sqlx::query_as::<_, PasswordReset>(&query)
            .bind(user_id)
            .bind(code)
            .bind(expires_at)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_code_for_update<'e>(
        executor: impl PgExecutor<'e>,
        code: &str,
    ) -> Result<Option<PasswordReset>, sqlx::Error> {
        let query =
            format!("SELECT {RESET_COLUMNS} FROM password_resets WHERE code = $1 FOR UPDATE");
        sqlx::query_as::<_, PasswordReset>(&query)
            .bind(code)
            .fetch_optional(executor)
            .await
    }

    pub async fn delete<'e>(executor: impl PgExecutor<'e>, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM password_resets WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
