//! Capability checks applied before every question/answer mutation.
//!
//! The gate only answers "may `actor` perform `action` on `target`". It never
//! loads anything: callers pass the author ids of the already-locked rows.
//! Anonymous requests are rejected by the HTTP layer and never get here.

use crate::error::CoreError;
use crate::types::DbId;

/// The authenticated user performing an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
}

impl Actor {
    pub fn new(user_id: DbId) -> Self {
        Self { user_id }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Edit,
    Append,
    Delete,
    Accept,
    Comment,
    /// Post a new answer to a question.
    Answer,
    Vote,
}

/// Ownership facts about the entity being acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Question {
        author_id: DbId,
    },
    Answer {
        author_id: DbId,
        question_author_id: DbId,
    },
}

impl Target {
    pub fn author_id(&self) -> DbId {
        match *self {
            Target::Question { author_id } => author_id,
            Target::Answer { author_id, .. } => author_id,
        }
    }

    fn kind(&self) -> &'static str {
        match self {
            Target::Question { .. } => "question",
            Target::Answer { .. } => "answer",
        }
    }
}

/// Why the gate refused an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Denial {
    /// Edit/append/delete by someone other than the author.
    NotAuthor,
    /// Accept by someone other than the question's author.
    NotQuestionAuthor,
    /// Author voting on their own post.
    SelfVote,
    /// The action does not apply to this kind of target.
    NotApplicable,
}

/// Decide whether `actor` may perform `action` on `target`.
pub fn authorize(actor: &Actor, action: Action, target: &Target) -> Result<(), Denial> {
    let is_author = actor.user_id == target.author_id();

    match (action, target) {
        (Action::Edit | Action::Append | Action::Delete, _) => {
            if is_author {
                Ok(())
            } else {
                Err(Denial::NotAuthor)
            }
        }
        (
            Action::Accept,
            Target::Answer {
                question_author_id, ..
            },
        ) => {
            if actor.user_id == *question_author_id {
                Ok(())
            } else {
                Err(Denial::NotQuestionAuthor)
            }
        }
        (Action::Accept, Target::Question { .. }) => Err(Denial::NotApplicable),
        (Action::Comment, _) => Ok(()),
        (Action::Answer, Target::Question { .. }) => Ok(()),
        (Action::Answer, Target::Answer { .. }) => Err(Denial::NotApplicable),
        (Action::Vote, _) => {
            if is_author {
                Err(Denial::SelfVote)
            } else {
                Ok(())
            }
        }
    }
}

/// Like [`authorize`], but maps a denial straight to a [`CoreError`].
pub fn require(actor: &Actor, action: Action, target: &Target) -> Result<(), CoreError> {
    authorize(actor, action, target).map_err(|denial| denial_error(denial, action, target))
}

fn denial_error(denial: Denial, action: Action, target: &Target) -> CoreError {
    let kind = target.kind();
    match denial {
        Denial::NotAuthor => {
            CoreError::Forbidden(format!("Only the author may {} this {kind}", verb(action)))
        }
        Denial::NotQuestionAuthor => {
            CoreError::Forbidden("Only the question's author may accept an answer".into())
        }
        Denial::SelfVote => CoreError::Forbidden(format!("Cannot vote on your own {kind}")),
        Denial::NotApplicable => {
            CoreError::Validation(format!("Cannot {} a {kind}", verb(action)))
        }
    }
}

fn verb(action: Action) -> &'static str {
    match action {
        Action::Edit => "edit",
        Action::Append => "append to",
        Action::Delete => "delete",
        Action::Accept => "accept",
        Action::Comment => "comment on",
        Action::Answer => "answer",
        Action::Vote => "vote on",
    }
}
