pub mod answers;
pub mod auth;
pub mod comments;
pub mod lists;
pub mod questions;
pub mod users;
pub mod votes;
