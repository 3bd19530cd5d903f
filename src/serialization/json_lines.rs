use super::JsonLinesWriter;
use super::open_file;
use crate::error::{Error, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read newline-delimited JSON records from `path`.
///
/// Lines are trimmed and blank lines skipped. The first line that fails to
/// decode (including a line that is not UTF-8) aborts the read with an
/// [`Error::Json`] carrying its line number.
pub fn read_json_lines<T, P>(path: P) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    read_json_lines_with_progress(path, false)
}

/// [`read_json_lines`] with a spinner counting records on stderr
pub fn read_json_lines_with_progress<T, P>(path: P, show_progress: bool) -> Result<Vec<T>>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let mut reader = BufReader::new(open_file(path)?);
    let spinner = record_spinner(show_progress, "Reading", path);
    let mut records = Vec::new();
    let mut buffer = Vec::new();
    let mut line_number = 0;

    loop {
        buffer.clear();
        let read = reader
            .read_until(b'\n', &mut buffer)
            .map_err(|e| Error::io(path, e))?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let line = buffer.trim_ascii();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_slice(line) {
            Ok(record) => {
                records.push(record);
                spinner.inc(1);
            }
            Err(e) => {
                spinner.abandon();
                return Err(Error::json(path, Some(line_number), e));
            }
        }
    }

    spinner.finish();
    tracing::debug!("Read {} JSON lines from {}", records.len(), path.display());
    Ok(records)
}

/// Write each record on its own line, replacing any existing file.
///
/// Goes through [`JsonLinesWriter`], so the output ends with a newline
/// unless `records` is empty.
pub fn write_json_lines<I, P>(records: I, path: P) -> Result<()>
where
    I: IntoIterator,
    I::Item: Serialize,
    P: AsRef<Path>,
{
    write_json_lines_with_progress(records, path, false)
}

/// [`write_json_lines`] with a spinner counting records on stderr
pub fn write_json_lines_with_progress<I, P>(records: I, path: P, show_progress: bool) -> Result<()>
where
    I: IntoIterator,
    I::Item: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let spinner = record_spinner(show_progress, "Writing", path);
    let written = JsonLinesWriter::scoped(path, |writer| {
        writer.add(records.into_iter().inspect(|_| spinner.inc(1)))
    });

    match written {
        Ok(()) => spinner.finish(),
        Err(_) => spinner.abandon(),
    }
    written
}

fn record_spinner(visible: bool, action: &str, path: &Path) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.green} {msg} {pos} records ({per_sec})")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "),
    );
    spinner.set_message(format!("{action} {}", path.display()));
    spinner
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};
    use tempfile::TempDir;

    #[test]
    fn test_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("records.jsonl");
        let records = vec![json!({"a": 1}), json!([1, 2, 3]), json!("text\nwith newline"), json!(null)];

        write_json_lines(&records, &path).unwrap();
        let loaded: Vec<Value> = read_json_lines(&path).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_output_has_one_record_per_line() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("records.jsonl");

        write_json_lines(&[json!({"a": 1}), json!({"b": 2})], &path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "{\"a\":1}\n{\"b\":2}\n");
    }

    #[test]
    fn test_empty_input_writes_empty_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("empty.jsonl");

        write_json_lines(&Vec::<Value>::new(), &path).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "");
        let loaded: Vec<Value> = read_json_lines(&path).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sparse.jsonl");
        std::fs::write(&path, "\n{\"a\": 1}\n   \n\t\n{\"a\": 2}  \n\n").unwrap();

        let loaded: Vec<Value> = read_json_lines(&path).unwrap();

        assert_eq!(loaded, vec![json!({"a": 1}), json!({"a": 2})]);
    }

    #[test]
    fn test_non_utf8_line_is_decoding_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("latin1.jsonl");
        let mut content = b"{\"a\": 1}\n{\"name\": \"caf".to_vec();
        content.extend_from_slice(&[0xE9, b'"', b'}', b'\n']);
        std::fs::write(&path, content).unwrap();

        let result: Result<Vec<Value>> = read_json_lines(&path);

        match result {
            Err(Error::Json { line, .. }) => assert_eq!(line, Some(2)),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }

    #[test]
    fn test_progress_variants_match_plain_ones() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("progress.jsonl");
        let records: Vec<Value> = (0..50).map(|i| json!({"i": i})).collect();

        write_json_lines_with_progress(&records, &path, true).unwrap();
        let loaded: Vec<Value> = read_json_lines_with_progress(&path, true).unwrap();

        assert_eq!(loaded, records);
        assert_eq!(std::fs::read_to_string(&path).unwrap().lines().count(), 50);
    }

    #[test]
    fn test_bad_line_reports_line_number() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.jsonl");
        std::fs::write(&path, "{\"a\": 1}\n\nnot json\n").unwrap();

        let result: Result<Vec<Value>> = read_json_lines(&path);

        match result {
            Err(Error::Json { line, .. }) => assert_eq!(line, Some(3)),
            other => panic!("expected JSON error, got {other:?}"),
        }
    }
}
