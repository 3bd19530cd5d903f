//! Configuration management for rutils
//!
//! Settings are layered with figment, lowest priority first:
//!
//! 1. Embedded `default-config.toml`
//! 2. User config in `<config dir>/rutils/config.{toml,json,yaml}`
//! 3. Project config `rutils.{toml,json,yaml}` in the working directory
//! 4. `RUTILS_*` environment variables, `__` separating nested keys
//!    (`RUTILS_PARALLEL__POOL_SIZE=4`)

pub mod core;

pub use core::{
    JsonLinesConfig, ParallelConfig, ProjectConfig, RutilsConfig, VersionConfig, VersionTarget,
};
