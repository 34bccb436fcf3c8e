//! Comments and appends, which hang off either a question or an answer.

use aristotle_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// The kind of post a comment or append is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostKind {
    Question,
    Answer,
}

impl PostKind {
    pub fn comment_table(self) -> &'static str {
        match self {
            PostKind::Question => "question_comments",
            PostKind::Answer => "answer_comments",
        }
    }

    pub fn append_table(self) -> &'static str {
        match self {
            PostKind::Question => "question_appends",
            PostKind::Answer => "answer_appends",
        }
    }

    /// Foreign-key column pointing at the parent post.
    pub fn parent_column(self) -> &'static str {
        match self {
            PostKind::Question => "question_id",
            PostKind::Answer => "answer_id",
        }
    }
}

/// A comment with its author's name. `target_id` is the parent post.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Comment {
    pub id: DbId,
    pub target_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub content: String,
    pub created_at: Timestamp,
}

/// Supplementary text added by the post's author after the fact.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Append {
    pub id: DbId,
    pub target_id: DbId,
    pub content: String,
    pub created_at: Timestamp,
}
