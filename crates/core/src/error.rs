use crate::types::DbId;
use crate::validation::FieldError;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// One entry per offending field, so callers can render them together.
    #[error("Validation failed for {} field(s)", .0.len())]
    InvalidFields(Vec<FieldError>),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The requested state change is not allowed from the current state.
    #[error("Unsupported transition: {0}")]
    UnsupportedTransition(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
