//! Error types for the resolver
//!
//! Resolution failures never surface through this type to engine callers;
//! they are logged and degraded to an empty result. What remains are
//! configuration and lifecycle errors, plus the lookup error that
//! [`NameLookup`](crate::traits::NameLookup) implementations report.

use thiserror::Error;

/// Result type alias for resolver operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the resolver
#[derive(Error, Debug)]
pub enum Error {
    /// Name lookup failed
    #[error("Lookup error ({lookup}): {message}")]
    Lookup {
        /// Name of the lookup implementation
        lookup: String,
        /// Error message
        message: String,
    },

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// `start()` was called on a resolver that is already started
    #[error("Resolver already started")]
    AlreadyStarted,

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a lookup error
    pub fn lookup(lookup: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Lookup {
            lookup: lookup.into(),
            message: message.into(),
        }
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(err.to_string())
    }
}
