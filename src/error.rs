//! Crate-level error type and `Result` alias.
//! Variants follow the failure taxonomy callers act on: transport and timeout,
//! credential and rate-limit rejections, other upstream failures, missing
//! titles, bad selections and export failures.
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Network error: {0}")]
    Transport(String),

    #[error("Request timed out")]
    Timeout,

    #[error("Invalid API key or request quota exhausted (HTTP {status})")]
    Auth { status: u16 },

    #[error("Rate limit exceeded (HTTP 429)")]
    RateLimited,

    #[error("Upstream error: {message}")]
    Upstream { status: Option<u16>, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid selection: {input:?}")]
    InvalidSelection { input: String },

    #[error("Failed to write {path:?}: {source}")]
    Export {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Query {query:?} leaves nothing to build a file name from")]
    InvalidFileName { query: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Coarse classification of an [`Error`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum FailureKind {
    Transport,
    Auth,
    RateLimited,
    UpstreamError,
    NotFound,
    InvalidSelection,
    ExportError,
    Other,
}

impl Error {
    pub fn kind(&self) -> FailureKind {
        match self {
            Error::Transport(_) | Error::Timeout => FailureKind::Transport,
            Error::Auth { .. } => FailureKind::Auth,
            Error::RateLimited => FailureKind::RateLimited,
            Error::Upstream { .. } | Error::Json(_) => FailureKind::UpstreamError,
            Error::NotFound(_) => FailureKind::NotFound,
            Error::InvalidSelection { .. } => FailureKind::InvalidSelection,
            Error::Export { .. } | Error::InvalidFileName { .. } => FailureKind::ExportError,
            Error::Config(_) | Error::Io(_) => FailureKind::Other,
        }
    }
}
