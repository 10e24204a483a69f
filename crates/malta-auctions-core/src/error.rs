//! Error types for the auction registry domain

use thiserror::Error;

/// Result type alias for domain operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Main error type for domain operations
///
/// The compliance operations themselves never fail; these errors come from
/// validating records before screening and from building the engine out of
/// configuration.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Invalid asset type
    #[error("Invalid asset type: {0}")]
    InvalidAssetType(String),

    /// Invalid seizure reason
    #[error("Invalid seizure reason: {0}")]
    InvalidSeizureReason(String),

    /// Invalid contraband type
    #[error("Invalid contraband type: {0}")]
    InvalidContrabandType(String),

    /// Validation error
    #[error("Validation error: {0}")]
    ValidationError(String),

    /// Compliance rule configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

impl From<regex::Error> for RegistryError {
    fn from(err: regex::Error) -> Self {
        RegistryError::ConfigurationError(format!("invalid redaction pattern: {}", err))
    }
}
