//! Question models.

use aristotle_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `questions` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Question {
    pub id: DbId,
    pub author_id: DbId,
    pub title: String,
    pub content: String,
    pub solved: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// A question with the aggregates used for listing and sorting.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct QuestionSummary {
    pub id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub title: String,
    pub content: String,
    pub solved: bool,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub answers_count: i64,
    pub votes_count: i64,
    pub net_score: i64,
    pub hits_count: i64,
    pub tags: Vec<String>,
}

pub struct CreateQuestion<'a> {
    pub author_id: DbId,
    pub title: &'a str,
    pub content: &'a str,
}

/// Which questions a listing covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionFilter<'a> {
    All,
    /// Questions carrying this tag name.
    Tagged(&'a str),
    /// Case-sensitive substring of title or content.
    Containing(&'a str),
    AuthoredBy(DbId),
}
