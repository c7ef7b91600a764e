//! Database and service error types for supp-db.

use supp_core::errors::CoreError;
use thiserror::Error;

/// Errors from database operations and the audited service layer.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    #[error("Record not found: id={id}, ser_id={ser_id}")]
    NotFound { id: String, ser_id: String },

    #[error("Record already exists: id={id}, ser_id={ser_id}")]
    AlreadyExists { id: String, ser_id: String },

    /// An update carried no change to the stored record.
    #[error("No changes detected")]
    NoChanges,

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Entry construction or actor lookup failed.
    #[error(transparent)]
    Core(CoreError),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<CoreError> for DatabaseError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Validation(message) => Self::Validation(message),
            other => Self::Core(other),
        }
    }
}
