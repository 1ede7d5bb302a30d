//! Error types for the gig service
//!
//! Deliberately narrow: rejected requests and unknown request ids are NOT
//! errors (admission rejection is a valid outcome, and lifecycle actions on
//! unknown ids are silent no-ops). What remains is session misuse and bad
//! intake input.

use thiserror::Error;

/// Main error type for the gig service
#[derive(Error, Debug)]
pub enum Error {
    /// No gig session is currently active
    #[error("No active gig")]
    NoActiveGig,

    /// A gig session is already running
    #[error("A gig is already active")]
    GigAlreadyActive,

    /// Invalid intake or request parameter
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience Result type using gig service Error
pub type Result<T> = std::result::Result<T, Error>;
