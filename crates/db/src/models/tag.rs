//! Tag models.

use aristotle_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub question_id: DbId,
    pub name: String,
}

/// A distinct tag name and how many questions carry it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagCount {
    pub name: String,
    pub questions_count: i64,
}
