//! Custom error types for the common library
//!
//! This module defines the persistence error type shared by the services.
//! Unique-key collisions get their own variant so callers can turn them into
//! user-facing messages instead of generic server faults.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// A unique constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),
}

impl DatabaseError {
    /// Classify an error returned by a query
    pub fn from_query(err: SqlxError) -> Self {
        match &err {
            SqlxError::Database(db_err) if db_err.is_unique_violation() => {
                let constraint = db_err
                    .constraint()
                    .map(str::to_string)
                    .unwrap_or_else(|| db_err.message().to_string());
                DatabaseError::UniqueViolation(constraint)
            }
            _ => DatabaseError::Query(err),
        }
    }

    /// Whether this error is a unique-key collision
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation(_))
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_query_errors() {
        let err = DatabaseError::from_query(SqlxError::RowNotFound);
        assert!(matches!(err, DatabaseError::Query(SqlxError::RowNotFound)));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn test_unique_violation_display() {
        let err = DatabaseError::UniqueViolation("users_username_key".to_string());
        assert!(err.is_unique_violation());
        assert_eq!(
            err.to_string(),
            "Unique constraint violated: users_username_key"
        );
    }
}
