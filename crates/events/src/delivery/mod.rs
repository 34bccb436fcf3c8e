//! External delivery channels for account notifications.

pub mod email;
