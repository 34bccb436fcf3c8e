//! Account codes: activation links and password-reset links.

use chrono::Duration;
use rand::Rng;
use sha2::{Digest, Sha256};

use crate::error::CoreError;
use crate::types::Timestamp;

/// Activation links stay valid for a day.
pub const ACTIVATION_TTL_HOURS: i64 = 24;

/// Password-reset links stay valid for ten minutes.
pub const PASSWORD_RESET_TTL_MINUTES: i64 = 10;

/// Gender recorded on a fresh member profile.
pub const DEFAULT_GENDER: &str = "Unknown";

/// Generate a random, URL-safe code (64 lowercase hex characters).
pub fn generate_unique_code() -> String {
    let seed: [u8; 32] = rand::rng().random();
    format!("{:x}", Sha256::digest(seed))
}

pub fn activation_expires_at(now: Timestamp) -> Timestamp {
    now + Duration::hours(ACTIVATION_TTL_HOURS)
}

pub fn password_reset_expires_at(now: Timestamp) -> Timestamp {
    now + Duration::minutes(PASSWORD_RESET_TTL_MINUTES)
}

/// An activation code works once, and only before it expires.
pub fn check_activation(
    already_active: bool,
    expires_at: Timestamp,
    now: Timestamp,
) -> Result<(), CoreError> {
    if already_active || expires_at <= now {
        return Err(CoreError::Validation(
            "The activation code is not valid or has expired".to_string(),
        ));
    }
    Ok(())
}

pub fn check_password_reset(expires_at: Timestamp, now: Timestamp) -> Result<(), CoreError> {
    if expires_at <= now {
        return Err(CoreError::Validation("The code has expired".to_string()));
    }
    Ok(())
}
