//! # rutils - everyday helpers for data scripts
//!
//! - [`serialization`]: read and write JSON, JSON-lines and binary files,
//!   plus a buffered [`JsonLinesWriter`](serialization::JsonLinesWriter)
//! - [`format`]: human readable sizes, durations and section titles
//! - [`process`]: resident memory, caller location and project root lookup
//! - [`parallel`]: order-preserving parallel map with a progress bar
//! - [`timer`]: scoped wall-clock timing
//! - [`version`]: semantic version bumping behind the `bump-version` binary
//!
//! ```no_run
//! use rutils::serialization::{read_json_lines, write_json_lines};
//! use serde_json::{Value, json};
//!
//! write_json_lines([json!({"id": 1}), json!({"id": 2})], "out/records.jsonl")?;
//! let records: Vec<Value> = read_json_lines("out/records.jsonl")?;
//! assert_eq!(records.len(), 2);
//! # Ok::<(), rutils::Error>(())
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod parallel;
pub mod process;
pub mod serialization;
pub mod timer;
pub mod version;

pub use config::RutilsConfig;
pub use error::{Error, Result};
pub use timer::Timer;

/// Version information, kept in sync by `bump-version`
pub const VERSION: &str = "0.1.0";

#[cfg(test)]
mod tests {
    #[test]
    fn test_version_matches_manifest() {
        assert_eq!(super::VERSION, env!("CARGO_PKG_VERSION"));
    }
}
