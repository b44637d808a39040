//! Database error types for skx-db.

use skx_core::errors::StoreError;
use thiserror::Error;

/// Errors from database operations.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// A SQL query failed or returned unparseable data.
    #[error("Query failed: {0}")]
    Query(String),

    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Expected a result row but none was returned.
    #[error("No result returned")]
    NoResult,

    /// Invalid state encountered (e.g., bad data in DB).
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DatabaseError {
    /// Whether this is a UNIQUE / PRIMARY KEY constraint violation.
    ///
    /// libSQL surfaces constraint failures as generic SQLite failures, so the
    /// check is on the message text.
    #[must_use]
    pub fn is_unique_violation(&self) -> bool {
        match self {
            Self::LibSql(e) => {
                let msg = e.to_string();
                msg.contains("UNIQUE constraint failed")
                    || msg.contains("PRIMARY KEY constraint failed")
            }
            _ => false,
        }
    }
}

impl From<DatabaseError> for StoreError {
    fn from(err: DatabaseError) -> Self {
        if err.is_unique_violation() {
            return Self::Conflict(err.to_string());
        }
        match err {
            DatabaseError::Other(e) => Self::Other(e),
            other => Self::Backend(other.to_string()),
        }
    }
}
