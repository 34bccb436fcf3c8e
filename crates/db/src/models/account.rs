//! One-time codes for account activation and password reset.

use aristotle_core::types::{DbId, Timestamp};
use sqlx::FromRow;

/// Row from the `activations` table.
#[derive(Debug, Clone, FromRow)]
pub struct Activation {
    pub id: DbId,
    pub user_id: DbId,
    pub code: String,
    pub is_active: bool,
    pub expires_at: Timestamp,
}

/// Row from the `password_resets` table.
#[derive(Debug, Clone, FromRow)]
pub struct PasswordReset {
    pub id: DbId,
    pub user_id: DbId,
    pub code: String,
    pub expires_at: Timestamp,
}
