//! Database-specific error types and conversions
//!
//! This module provides error types for repository operations, including
//! connection errors, query errors, and data decoding errors.

use thiserror::Error;

/// Result type alias for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Database-specific errors
#[derive(Debug, Error)]
pub enum DbError {
    /// Database connection error
    #[error("Database connection error: {0}")]
    Connection(String),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// SQL query error
    #[error("Query error: {0}")]
    Query(String),

    /// Database migration error
    #[error("Migration error: {0}")]
    Migration(String),

    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Foreign key violation
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// Unique constraint violation
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Stored row could not be mapped back to a domain value
    #[error("Invalid data format: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal database error
    #[error("Internal database error: {0}")]
    Internal(String),

    /// Domain error from core crate
    #[error("Domain error: {0}")]
    Domain(#[from] malta_auctions_core::RegistryError),
}

impl DbError {
    /// Check if this is a transient error that could be retried
    pub fn is_transient(&self) -> bool {
        matches!(self, DbError::Connection(_) | DbError::Pool(_))
    }
}

/// Convert SQLx database errors to our error type
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound("No rows returned".to_string()),

            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();

                // PostgreSQL error codes: https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => DbError::UniqueViolation(message),
                    Some("23503") => DbError::ForeignKeyViolation(message),
                    Some("23514") | Some("23000") | Some("23001") | Some("23502") => {
                        DbError::ConstraintViolation(message)
                    }
                    _ => DbError::Query(message),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::Pool("Connection pool timeout".to_string()),

            sqlx::Error::PoolClosed => DbError::Pool("Connection pool closed".to_string()),

            sqlx::Error::Io(io_err) => DbError::Connection(format!("I/O error: {}", io_err)),

            sqlx::Error::Tls(tls_err) => DbError::Connection(format!("TLS error: {}", tls_err)),

            sqlx::Error::Protocol(msg) => DbError::Connection(format!("Protocol error: {}", msg)),

            sqlx::Error::ColumnNotFound(col) => {
                DbError::InvalidData(format!("Column not found: {}", col))
            }

            sqlx::Error::Decode(msg) => DbError::Serialization(format!("Decode error: {}", msg)),

            sqlx::Error::Migrate(migrate_err) => DbError::Migration(format!("{}", migrate_err)),

            _ => DbError::Internal(format!("{}", err)),
        }
    }
}

/// Convert SQLx migration errors
impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::Migration(format!("{}", err))
    }
}

/// Convert URL parse errors
impl From<url::ParseError> for DbError {
    fn from(err: url::ParseError) -> Self {
        DbError::Configuration(format!("Invalid URL: {}", err))
    }
}
