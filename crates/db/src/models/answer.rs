//! Answer models.

use aristotle_core::lifecycle::RankedAnswer;
use aristotle_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Row from the `answers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Answer {
    pub id: DbId,
    pub question_id: DbId,
    pub author_id: DbId,
    pub content: String,
    pub accepted: bool,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
}

/// An answer joined with its author name and vote counts.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AnswerView {
    pub id: DbId,
    pub question_id: DbId,
    pub author_id: DbId,
    pub author_name: String,
    pub content: String,
    pub accepted: bool,
    pub accepted_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Option<Timestamp>,
    pub up_votes: i64,
    pub down_votes: i64,
}

impl RankedAnswer for AnswerView {
    fn is_accepted(&self) -> bool {
        self.accepted
    }

    fn net_score(&self) -> i64 {
        self.up_votes - self.down_votes
    }

    fn created_at(&self) -> Timestamp {
        self.created_at
    }
}

/// An answer listed on its author's profile.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct AuthoredAnswer {
    pub id: DbId,
    pub question_id: DbId,
    pub question_title: String,
    pub content: String,
    pub accepted: bool,
    pub created_at: Timestamp,
}

/// An answer row locked together with its question's author and state.
#[derive(Debug, Clone, FromRow)]
pub struct LockedAnswer {
    pub id: DbId,
    pub question_id: DbId,
    pub author_id: DbId,
    pub accepted: bool,
    pub question_author_id: DbId,
    pub question_solved: bool,
}
