use super::{create_file, open_file};
use crate::error::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// Read a whole JSON document from `path`
pub fn read_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let reader = BufReader::new(open_file(path)?);
    let value = serde_json::from_reader(reader).map_err(|e| Error::json(path, None, e))?;
    tracing::debug!("Read JSON from {}", path.display());
    Ok(value)
}

/// Write `value` as compact JSON, replacing any existing file
pub fn write_json<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    write_with(value, path.as_ref(), false)
}

/// Same as [`write_json`] but indents the output for humans
pub fn write_json_pretty<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    write_with(value, path.as_ref(), true)
}

fn write_with<T>(value: &T, path: &Path, pretty: bool) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let mut writer = BufWriter::new(create_file(path)?);

    let encoded = if pretty {
        serde_json::to_writer_pretty(&mut writer, value)
    } else {
        serde_json::to_writer(&mut writer, value)
    };
    encoded.map_err(|e| Error::json(path, None, e))?;

    writer.flush().map_err(|e| Error::io(path, e))?;
    tracing::debug!("Wrote JSON to {}", path.display());
    Ok(())
}
