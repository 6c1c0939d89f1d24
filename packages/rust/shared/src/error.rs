//! Error types for the web content chunker.
//!
//! Library crates use [`ChunkerError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all chunker operations.
///
/// Absence of extractable content is never an error: segmentation always
/// succeeds, possibly with an empty section list.
#[derive(Debug, thiserror::Error)]
pub enum ChunkerError {
    /// No URL was supplied at all.
    #[error("invalid input: URL is required")]
    MissingUrl,

    /// Malformed input, rejected before any network access.
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    /// The fetch could not complete (DNS, connection refused, timeout).
    #[error("network error: {0}")]
    Network(String),

    /// The target server answered with a non-success status.
    #[error("HTTP {status}: {status_text}")]
    Http {
        url: String,
        status: u16,
        status_text: String,
    },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// JSON or TOML serialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of a [`ChunkerError`], stable enough for callers to
/// branch on (e.g. to decide whether a retry makes sense).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    Transport,
    UpstreamHttp,
    Config,
    Io,
    Serialization,
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ChunkerError>;

impl ChunkerError {
    /// Create an invalid-input error from any displayable message.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
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

    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::MissingUrl | Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::Network(_) => ErrorKind::Transport,
            Self::Http { .. } => ErrorKind::UpstreamHttp,
            Self::Config { .. } => ErrorKind::Config,
            Self::Io { .. } => ErrorKind::Io,
            Self::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Upstream HTTP status, when the error came from a non-success response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}
