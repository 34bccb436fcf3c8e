//! Repository layer.
//!
//! Each repository is a zero-sized struct whose async methods take any
//! `PgExecutor` as the first argument: `&PgPool` for standalone reads, or
//! `&mut *tx` when the call is part of a lifecycle transaction.

pub mod account_repo;
pub mod answer_repo;
pub mod member_repo;
pub mod post_repo;
pub mod question_repo;
pub mod tag_repo;
pub mod user_repo;
pub mod vote_repo;

pub use account_repo::{ActivationRepo, PasswordResetRepo};
pub use answer_repo::AnswerRepo;
pub use member_repo::MemberRepo;
pub use post_repo::{AppendRepo, CommentRepo};
pub use question_repo::QuestionRepo;
pub use tag_repo::TagRepo;
pub use user_repo::UserRepo;
pub use vote_repo::VoteRepo;
