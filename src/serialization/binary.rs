//! Binary object files.
//!
//! Values are encoded with bincode 1.x. The encoding carries no schema and
//! no version tag, so it is **not** a stable interchange format: only read
//! files back with the same type definitions (and the same crate versions)
//! that wrote them. Use the JSON helpers for anything long-lived or shared.

use super::{create_file, open_file};
use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub fn read_binary<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = BufReader::new(open_file(path)?);
    let value = bincode::deserialize_from(reader).map_err(|e| Error::binary(path, e))?;
    tracing::debug!("Read binary object from {}", path.display());
    Ok(value)
}

/// Encode `value` into `path`, replacing any existing file
pub fn write_binary<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut writer = BufWriter::new(create_file(path)?);
    bincode::serialize_into(&mut writer, value).map_err(|e| Error::binary(path, e))?;
    writer.flush().map_err(|e| Error::io(path, e))?;
    tracing::debug!("Wrote binary object to {}", path.display());
    Ok(())
}
