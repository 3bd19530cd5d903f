//! Buffered JSON-lines writer
//!
//! Records are serialized as soon as they are added but only hit the disk
//! every `chunk_size` records, on an explicit [`JsonLinesWriter::flush`], or
//! when the writer is closed or dropped.
//!
//! ```rust,no_run
//! use rutils::serialization::JsonLinesWriter;
//! use serde_json::json;
//!
//! let mut writer = JsonLinesWriter::create("/tmp/out/records.jsonl")?;
//! writer.add([json!({"a": 1}), json!({"b": 2})])?;
//! writer.add_one(json!({"c": 3}))?;
//! writer.close()?;
//! # Ok::<(), rutils::Error>(())
//! ```

use super::create_file;
use crate::config::JsonLinesConfig;
use crate::error::{Error, Result};
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Records buffered before a write when no chunk size is given
pub const DEFAULT_CHUNK_SIZE: usize = 1_000;

#[derive(Debug)]
pub struct JsonLinesWriter {
    path: PathBuf,
    file: Option<File>,
    chunk_size: usize,
    line_buffer: Vec<String>,
    lines_written: usize,
}

impl JsonLinesWriter {
    /// Open `path` for writing with the default chunk size
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::with_chunk_size(path, DEFAULT_CHUNK_SIZE)
    }

    /// Open `path` for writing, flushing every `chunk_size` records
    pub fn with_chunk_size<P: AsRef<Path>>(path: P, chunk_size: usize) -> Result<Self> {
        if chunk_size == 0 {
            return Err(Error::invalid_argument("chunk size must be at least 1"));
        }

        let path = path.as_ref().to_path_buf();
        let file = create_file(&path)?;
        tracing::debug!(
            "Opened JSON lines writer on {} (chunk size {chunk_size})",
            path.display()
        );

        Ok(Self {
            path,
            file: Some(file),
            chunk_size,
            line_buffer: Vec::with_capacity(chunk_size.min(DEFAULT_CHUNK_SIZE)),
            lines_written: 0,
        })
    }

    /// Open `path` with the configured `json_lines.chunk_size`
    pub fn from_config<P: AsRef<Path>>(path: P, config: &JsonLinesConfig) -> Result<Self> {
        Self::with_chunk_size(path, config.chunk_size)
    }

    /// Run `f` against a fresh writer and close it afterwards.
    ///
    /// The writer is closed on every path. An error from `f` takes precedence
    /// over an error raised while closing.
    pub fn scoped<P, F, R>(path: P, f: F) -> Result<R>
    where
        P: AsRef<Path>,
        F: FnOnce(&mut JsonLinesWriter) -> Result<R>,
    {
        let mut writer = Self::create(path)?;
        let outcome = f(&mut writer);
        let closed = writer.close();
        let value = outcome?;
        closed?;
        Ok(value)
    }

    /// Serialize and buffer every item, flushing whenever the buffer is full
    pub fn add<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator,
        I::Item: Serialize,
    {
        for item in items {
            let line = serde_json::to_string(&item).map_err(|e| Error::json(&self.path, None, e))?;
            self.line_buffer.push(line);
            if self.line_buffer.len() >= self.chunk_size {
                self.flush()?;
            }
        }
        Ok(())
    }

    pub fn add_one<T: Serialize>(&mut self, item: T) -> Result<()> {
        self.add(std::iter::once(item))
    }

    /// Write the buffered lines to the file. No-op when nothing is pending.
    pub fn flush(&mut self) -> Result<()> {
        if self.line_buffer.is_empty() {
            return Ok(());
        }

        // The file is only taken by `finish`, after a last flush
        debug_assert!(self.file.is_some(), "flush after close");
        let Some(file) = self.file.as_mut() else {
            return Ok(());
        };

        let mut chunk = self.line_buffer.join("\n");
        chunk.push('\n');
        file.write_all(chunk.as_bytes())
            .map_err(|e| Error::io(&self.path, e))?;

        tracing::trace!(
            "Flushed {} lines to {}",
            self.line_buffer.len(),
            self.path.display()
        );
        self.lines_written += self.line_buffer.len();
        self.line_buffer.clear();
        Ok(())
    }

    /// Flush pending lines and close the file
    pub fn close(mut self) -> Result<()> {
        self.finish()
    }

    /// Records already written to disk (pending ones are not counted)
    pub fn lines_written(&self) -> usize {
        self.lines_written
    }

    pub fn pending(&self) -> usize {
        self.line_buffer.len()
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn finish(&mut self) -> Result<()> {
        if self.file.is_none() {
            return Ok(());
        }
        let flushed = self.flush();
        if let Some(mut file) = self.file.take() {
            file.flush().map_err(|e| Error::io(&self.path, e))?;
        }
        flushed?;
        tracing::debug!(
            "Closed JSON lines writer on {} ({} lines)",
            self.path.display(),
            self.lines_written
        );
        Ok(())
    }
}

impl Drop for JsonLinesWriter {
    fn drop(&mut self) {
        if let Err(e) = self.finish() {
            tracing::warn!("Failed to close JSON lines writer: {e}");
        }
    }
}
