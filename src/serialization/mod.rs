//! File readers and writers for JSON, JSON-lines and binary objects
//!
//! Every writer creates missing parent directories and truncates existing
//! content. Readers fail fast: a missing file is an [`Error::Io`], bad content
//! is an [`Error::Json`] or [`Error::Binary`].
//!
//! [`Error::Io`]: crate::Error::Io
//! [`Error::Json`]: crate::Error::Json
//! [`Error::Binary`]: crate::Error::Binary

pub mod binary;
pub mod json;
pub mod json_lines;
pub mod writer;

pub use binary::{read_binary, write_binary};
pub use json::{read_json, write_json, write_json_pretty};
pub use json_lines::{
    read_json_lines, read_json_lines_with_progress, write_json_lines,
    write_json_lines_with_progress,
};
pub use writer::{DEFAULT_CHUNK_SIZE, JsonLinesWriter};

use crate::error::{Error, Result};
use std::fs::{self, File};
use std::path::Path;

/// Create the parent directory of `path` if it does not exist yet
pub(crate) fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }
    Ok(())
}

/// Open `path` for writing, truncating it and creating parent directories
pub(crate) fn create_file(path: &Path) -> Result<File> {
    ensure_parent_dir(path)?;
    File::create(path).map_err(|e| Error::io(path, e))
}

pub(crate) fn open_file(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| Error::io(path, e))
}
