//! Question/answer lifecycle: every mutation of the Q&A core.
//!
//! Each operation runs in one transaction. It locks the row it authorizes
//! against, checks existence and capability before any write, applies the
//! change, and commits. Callers hand in an [`Actor`] and, where there is a
//! body, a command that already passed validation.
//!
//! [`Actor`]: aristotle_core::authorization::Actor

pub mod answer;
pub mod detail;
pub mod error;
pub mod question;
pub mod tags;
pub mod vote;

pub use error::{LifecycleError, LifecycleResult};
