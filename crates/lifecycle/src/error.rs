use aristotle_core::error::CoreError;
use aristotle_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum LifecycleError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type LifecycleResult<T> = Result<T, LifecycleError>;

pub(crate) fn not_found(entity: &'static str, id: DbId) -> LifecycleError {
    LifecycleError::Core(CoreError::NotFound { entity, id })
}
