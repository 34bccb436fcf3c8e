//! Row models and DTOs.
//!
//! Each submodule holds the `FromRow` structs read from its tables plus the
//! input DTOs the repositories write from.

pub mod account;
pub mod answer;
pub mod post;
pub mod question;
pub mod tag;
pub mod user;
pub mod vote;
