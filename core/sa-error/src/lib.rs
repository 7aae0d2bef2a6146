//! Error types for sshauth.
//!
//! This crate provides:
//! - [`SaError`] - Top-level error enum for a key aggregation run
//! - [`StoreError`] - Errors reported by the object store capability
//!
//! Only listing failures are meant to escape an aggregation run. Fetch
//! failures for individual keys are absorbed into empty records by the
//! caller, and output errors are classified with [`is_broken_pipe`].

use std::io;

use thiserror::Error;

/// Top-level error type for sshauth.
#[derive(Error, Debug)]
pub enum SaError {
    /// Listing the user's prefix failed
    #[error("Listing error: {0}")]
    Listing(StoreError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic errors (wrapped anyhow)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Object store errors.
///
/// Service errors carry the machine-readable code and message returned by
/// the store. Everything else (DNS, TLS, timeouts, truncated bodies) is a
/// transport error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The service answered with an error code
    #[error("{code}: {message}")]
    Service { code: String, message: String },

    /// The request never produced a service answer
    #[error("{0}")]
    Transport(String),
}

impl StoreError {
    /// Create a service error from a code and message.
    pub fn service(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Service {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Create a transport error.
    pub fn transport(detail: impl Into<String>) -> Self {
        Self::Transport(detail.into())
    }

    /// The service error code, if the store supplied one.
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Service { code, .. } => Some(code),
            Self::Transport(_) => None,
        }
    }
}

/// Returns true when a write failed because the reader closed its end.
pub fn is_broken_pipe(error: &io::Error) -> bool {
    error.kind() == io::ErrorKind::BrokenPipe
}

/// Result type alias using SaError.
pub type Result<T> = std::result::Result<T, SaError>;

/// Result type alias for object store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;
