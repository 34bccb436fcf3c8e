//! Request extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated user from a JWT Bearer token.
//! - [`auth::Viewer`] -- Identifies a signed-in or anonymous page viewer.

pub mod auth;
