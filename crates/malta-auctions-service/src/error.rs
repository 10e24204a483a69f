//! Service-layer error types
//!
//! This module defines error types specific to the service layer,
//! mapping domain, database and upstream errors to service-level errors.

use malta_auctions_core::RegistryError;
use malta_auctions_db::DbError;
use thiserror::Error;

/// Result type alias for service operations
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Service-layer error types
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationFailed(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Upstream notice source could not be read
    #[error("Upstream source error: {0}")]
    Upstream(String),

    /// Storage backend temporarily unreachable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal service error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<RegistryError> for ServiceError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::ValidationError(msg) => ServiceError::ValidationFailed(msg),
            RegistryError::InvalidAssetType(_)
            | RegistryError::InvalidSeizureReason(_)
            | RegistryError::InvalidContrabandType(_) => ServiceError::InvalidInput(err.to_string()),
            RegistryError::ConfigurationError(msg) => ServiceError::Configuration(msg),
        }
    }
}

impl From<DbError> for ServiceError {
    fn from(err: DbError) -> Self {
        if err.is_transient() {
            return ServiceError::Unavailable(err.to_string());
        }

        match err {
            DbError::NotFound(msg) => ServiceError::NotFound(msg),
            DbError::ConstraintViolation(msg)
            | DbError::ForeignKeyViolation(msg)
            | DbError::UniqueViolation(msg) => ServiceError::ValidationFailed(msg),
            DbError::Connection(msg) | DbError::Pool(msg) | DbError::Query(msg) => {
                ServiceError::Database(msg)
            }
            DbError::InvalidData(msg) | DbError::Serialization(msg) => {
                ServiceError::Internal(msg)
            }
            DbError::Configuration(msg) | DbError::Migration(msg) => {
                ServiceError::Configuration(msg)
            }
            DbError::Domain(err) => ServiceError::from(err),
            DbError::Internal(msg) => ServiceError::Internal(msg),
        }
    }
}

impl From<reqwest::Error> for ServiceError {
    fn from(err: reqwest::Error) -> Self {
        ServiceError::Upstream(err.to_string())
    }
}

impl From<csv::Error> for ServiceError {
    fn from(err: csv::Error) -> Self {
        ServiceError::InvalidInput(format!("Malformed CSV: {}", err))
    }
}

impl From<regex::Error> for ServiceError {
    fn from(err: regex::Error) -> Self {
        ServiceError::Internal(format!("Invalid pattern: {}", err))
    }
}
