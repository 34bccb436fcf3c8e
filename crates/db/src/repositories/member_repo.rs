//! Repository for the `members` table (user profiles).

use aristotle_core::types::DbId;
use sqlx::PgExecutor;

use crate::models::user::{Member, UpdateMember};

const COLUMNS: &str = "user_id, gender, age, occupation, education, address, phone, \
                       company, website, interests, bio, avatar, last_login_ip";

pub struct MemberRepo;

impl MemberRepo {
    /// Create the profile row for a new user, with every field at its default.
    pub async fn create_default<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        gender: &str,
    ) -> Result<Member, sqlx::Error> {
        let query = format!(
            "INSERT INTO members (user_id, gender) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .bind(gender)
            .fetch_one(executor)
            .await
    }

    pub async fn find_by_user<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM members WHERE user_id = $1");
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .fetch_optional(executor)
            .await
    }

    /// Overwrite the editable profile fields.
    pub async fn update<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        input: &UpdateMember,
    ) -> Result<Option<Member>, sqlx::Error> {
        let query = format!(
            "UPDATE members SET
                gender = $2, age = $3, occupation = $4, education = $5,
                address = $6, phone = $7, company = $8, website = $9,
                interests = $10, bio = $11
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Member>(&query)
            .bind(user_id)
            .bind(&input.gender)
            .bind(input.age)
            .bind(&input.occupation)
            .bind(&input.education)
            .bind(&input.address)
            .bind(&input.phone)
            .bind(&input.company)
            .bind(&input.website)
            .bind(&input.interests)
            .bind(&input.bio)
            .fetch_optional(executor)
            .await
    }

    pub async fn record_login_ip<'e>(
        executor: impl PgExecutor<'e>,
        user_id: DbId,
        ip: &str,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE members SET last_login_ip = $2 WHERE user_id = $1")
            .bind(user_id)
            .bind(ip)
            .execute(executor)
            .await?;
        Ok(())
    }
}
