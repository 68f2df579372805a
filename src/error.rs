//! Error types for the address book.
//!
//! This module defines custom error types using `thiserror` for precise error handling.
//! Index engines never fail: lookups and mutations over in-memory maps have no
//! recoverable error cases. Errors only arise from caller input and configuration.

use crate::domain::ValidationError;
use thiserror::Error;

/// Errors surfaced by the address book service to its callers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DirectoryError {
    /// The caller supplied an argument the directory cannot act on
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A payload value failed domain validation
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl DirectoryError {
    /// Whether the error was caused by the caller rather than the directory.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidArgument(_) | Self::Validation(_))
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with DirectoryError
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;
