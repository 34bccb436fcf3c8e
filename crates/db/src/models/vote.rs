//! Vote rows and the vote-target abstraction shared by questions and answers.

use aristotle_core::authorization::Target;
use aristotle_core::error::CoreError;
use aristotle_core::types::{DbId, Timestamp};
use aristotle_core::voting::VoteDirection;
use sqlx::FromRow;

/// A votable entity: names the vote table and how to lock the voted-on row.
///
/// Implemented by the [`QuestionVotes`] and [`AnswerVotes`] markers so one
/// repository and one ledger routine serve both.
pub trait VoteTarget: Send + Sync + 'static {
    /// Entity name used in not-found errors and logs.
    const ENTITY: &'static str;
    const VOTE_TABLE: &'static str;
    /// Column in `VOTE_TABLE` referencing the voted-on row.
    const TARGET_COLUMN: &'static str;
    /// Locks the voted-on row by id (`$1`), selecting its `author_id` and
    /// the `question_author_id` of the question it belongs to.
    const LOCK_QUERY: &'static str;

    /// Ownership facts for the authorization gate.
    fn target(author_id: DbId, question_author_id: DbId) -> Target;
}

pub struct QuestionVotes;

impl VoteTarget for QuestionVotes {
    const ENTITY: &'static str = "question";
    const VOTE_TABLE: &'static str = "question_votes";
    const TARGET_COLUMN: &'static str = "question_id";
    const LOCK_QUERY: &'static str =
        "SELECT author_id, author_id AS question_author_id FROM questions WHERE id = $1 FOR UPDATE";

    fn target(author_id: DbId, _question_author_id: DbId) -> Target {
        Target::Question { author_id }
    }
}

pub struct AnswerVotes;

impl VoteTarget for AnswerVotes {
    const ENTITY: &'static str = "answer";
    const VOTE_TABLE: &'static str = "answer_votes";
    const TARGET_COLUMN: &'static str = "answer_id";
    const LOCK_QUERY: &'static str = "SELECT a.author_id, q.author_id AS question_author_id
         FROM answers a
         JOIN questions q ON q.id = a.question_id
         WHERE a.id = $1
         FOR UPDATE OF a";

    fn target(author_id: DbId, question_author_id: DbId) -> Target {
        Target::Answer {
            author_id,
            question_author_id,
        }
    }
}

/// One vote row, normalized across both vote tables.
#[derive(Debug, Clone, FromRow)]
pub struct Vote {
    pub id: DbId,
    pub target_id: DbId,
    pub voter_id: DbId,
    pub direction: String,
    pub created_at: Timestamp,
}

impl Vote {
    pub fn direction(&self) -> Result<VoteDirection, CoreError> {
        VoteDirection::parse(&self.direction)
    }
}
