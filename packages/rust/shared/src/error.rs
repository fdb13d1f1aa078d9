//! Error types for dinodir.
//!
//! Library crates use [`DinoDirError`] via `thiserror`.
//! The CLI wraps this with `color-eyre`; the HTTP layer collapses it to a 500.

use std::path::PathBuf;

/// Top-level error type for all dinodir operations.
///
/// "No data found for an entity" is deliberately absent: it is modelled as the
/// [`NO_DATA`](crate::NO_DATA) sentinel on a successful record.
#[derive(Debug, thiserror::Error)]
pub enum DinoDirError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Transport failure or non-success status while retrieving a document.
    #[error("fetch error: {0}")]
    Fetch(String),

    /// The source answered 404 for the requested document.
    #[error("document not found: {path}")]
    NotFound { path: String },

    /// Empty or malformed document, or an unreadable embedded payload.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// Response serialization failure.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, DinoDirError>;

impl DinoDirError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create a parse error from any displayable message.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the source had no document at the path.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<serde_json::Error> for DinoDirError {
    fn from(err: serde_json::Error) -> Self {
        Self::Encoding(err.to_string())
    }
}
