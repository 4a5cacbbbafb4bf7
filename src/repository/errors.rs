use thiserror::Error;

/// Errors surfaced by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Underlying Diesel/SQLite failure. Transactional operations roll back
    /// before this is returned.
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    /// The connection pool could not hand out a connection.
    #[error("connection pool error: {0}")]
    Pool(#[from] diesel::r2d2::PoolError),
    /// A stored value violated a domain constraint.
    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Convenient alias for results returned from repository functions.
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<crate::domain::types::TypeConstraintError> for RepositoryError {
    fn from(value: crate::domain::types::TypeConstraintError) -> Self {
        RepositoryError::ValidationError(value.to_string())
    }
}
