//! User and member (profile) models and DTOs.

use aristotle_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full row from the `users` table.
///
/// Carries the password hash; never serialize it. Use [`UserResponse`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// Safe user representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: DbId,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            is_active: user.is_active,
            last_login_at: user.last_login_at,
            created_at: user.created_at,
        }
    }
}

/// One row of the public user list.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserSummary {
    pub id: DbId,
    pub username: String,
    pub avatar: Option<String>,
    pub created_at: Timestamp,
}

pub struct CreateUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Row from the `members` table: the profile attached to each user.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Member {
    pub user_id: DbId,
    pub gender: String,
    pub age: i32,
    pub occupation: String,
    pub education: String,
    pub address: String,
    pub phone: String,
    pub company: String,
    pub website: String,
    pub interests: String,
    pub bio: String,
    pub avatar: Option<String>,
    #[serde(skip_serializing)]
    pub last_login_ip: String,
}

/// Full replacement of the editable profile fields.
pub struct UpdateMember {
    pub gender: String,
    pub age: i32,
    pub occupation: String,
    pub education: String,
    pub address: String,
    pub phone: String,
    pub company: String,
    pub website: String,
    pub interests: String,
    pub bio: String,
}
