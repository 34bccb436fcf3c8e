//! Account notifications for the Q&A site.
//!
//! - [`AccountNotifier`] builds activation and password-reset messages and
//!   hands them to a background task, so a slow or broken mail server never
//!   delays or fails the request that triggered them.
//! - [`delivery`] holds the SMTP transport.

pub mod delivery;
pub mod notifier;

pub use delivery::email::{EmailConfig, EmailDelivery, EmailError, EmailMessage};
pub use notifier::AccountNotifier;
