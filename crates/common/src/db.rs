//! Shared database types for Teamline
//!
//! This module provides common database-related types used across domain
//! repositories.

use crate::error::Error;
use thiserror::Error;

/// Database-specific error types
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Record already exists")]
    AlreadyExists,

    #[error("Database connection error: {0}")]
    Connection(#[from] sqlx::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl RepositoryError {
    /// Classify a raw sqlx error, turning unique-constraint violations into
    /// `AlreadyExists` so callers can map them to `Conflict`.
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(ref db_err) = err {
            if db_err.is_unique_violation() {
                return RepositoryError::AlreadyExists;
            }
        }
        RepositoryError::Connection(err)
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Error::NotFound("Record not found".to_string()),
            RepositoryError::AlreadyExists => Error::Conflict("Record already exists".to_string()),
            RepositoryError::Connection(e) => Error::Database(e),
            RepositoryError::InvalidData(msg) => Error::Validation(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_maps_to_taxonomy() {
        assert!(matches!(
            Error::from(RepositoryError::NotFound),
            Error::NotFound(_)
        ));
        assert!(matches!(
            Error::from(RepositoryError::AlreadyExists),
            Error::Conflict(_)
        ));
        assert!(matches!(
            Error::from(RepositoryError::InvalidData("bad".to_string())),
            Error::Validation(_)
        ));
    }

    #[test]
    fn test_from_sqlx_keeps_infrastructure_errors() {
        let err = RepositoryError::from_sqlx(sqlx::Error::PoolClosed);
        assert!(matches!(err, RepositoryError::Connection(_)));
    }
}
