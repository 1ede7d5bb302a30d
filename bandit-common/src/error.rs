//! Common error types for Bandit
//!
//! The engine itself is total over its inputs (admission rejection is an
//! outcome, not an error), so the only shared failures are around loading
//! service configuration.

use thiserror::Error;

/// Common result type for Bandit operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors shared across the Bandit service
#[derive(Error, Debug)]
pub enum Error {
    /// Config file could not be read (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
