//! Domain rules for the Aristotle Q&A site.
//!
//! Everything in this crate is pure: no database, no HTTP, no clock reads
//! beyond what callers pass in. The lifecycle and API crates build on it.

pub mod account;
pub mod authorization;
pub mod commands;
pub mod error;
pub mod lifecycle;
pub mod listing;
pub mod tags;
pub mod types;
pub mod validation;
pub mod voting;
