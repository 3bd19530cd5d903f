//! Error type shared by every helper in the crate.
//!
//! Nothing in `rutils` retries or falls back: filesystem, decoding and
//! argument failures are surfaced to the immediate caller as one of the
//! variants below.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Filesystem failure (missing file, permission denied, disk full...)
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Content is not valid JSON, or does not match the requested type
    #[error("Invalid JSON in {}{}: {source}", path.display(), line.map(|n| format!(" (line {n})")).unwrap_or_default())]
    Json {
        path: PathBuf,
        /// 1-based line number for JSON-lines input
        line: Option<usize>,
        #[source]
        source: serde_json::Error,
    },

    /// Binary stream is corrupted or was produced for an incompatible type
    #[error("Invalid binary data in {}: {source}", path.display())]
    Binary {
        path: PathBuf,
        #[source]
        source: bincode::Error,
    },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A work item returned an error inside the parallel map
    #[error("Work item {index} failed: {source}")]
    Worker {
        index: usize,
        #[source]
        source: anyhow::Error,
    },

    #[error("Worker thread panicked: {0}")]
    WorkerPanicked(String),

    #[error("Process introspection failed: {0}")]
    Process(String),

    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),
}

impl Error {
    pub(crate) fn io(path: &Path, source: std::io::Error) -> Self {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn json(path: &Path, line: Option<usize>, source: serde_json::Error) -> Self {
        Error::Json {
            path: path.to_path_buf(),
            line,
            source,
        }
    }

    pub(crate) fn binary(path: &Path, source: bincode::Error) -> Self {
        Error::Binary {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument(message.into())
    }
}

/// Result type alias for rutils operations
pub type Result<T> = std::result::Result<T, Error>;
