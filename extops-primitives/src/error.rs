//! Shared error definitions for dispatch primitives.

use thiserror::Error;

/// Result alias used throughout the primitives crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing primitive types.
#[derive(Debug, Error)]
pub enum Error {
    /// Extension identifier failed validation.
    #[error("invalid extension id `{id}`: {reason}")]
    InvalidExtensionId {
        /// The offending identifier string.
        id: String,
        /// Human-readable reason for rejection.
        reason: String,
    },

    /// Condition flag failed validation.
    #[error("invalid condition flag `{flag}`: {reason}")]
    InvalidConditionFlag {
        /// The offending flag string.
        flag: String,
        /// Human-readable reason for rejection.
        reason: String,
    },
}
