use crate::error::Result;
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml, Yaml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

// Embed the default config at compile time
const DEFAULT_CONFIG: &str = include_str!("../../default-config.toml");

/// Main configuration structure for rutils
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RutilsConfig {
    pub json_lines: JsonLinesConfig,
    pub parallel: ParallelConfig,
    pub project: ProjectConfig,
    pub version: VersionConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonLinesConfig {
    /// Records buffered by `JsonLinesWriter` before each write
    pub chunk_size: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallelConfig {
    /// Worker threads for the parallel map (0 = one per CPU)
    pub pool_size: usize,
    /// How often the progress reporter polls the shared counter
    pub poll_interval_ms: u64,
    pub show_progress: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Files or directories that mark the project root
    pub root_markers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionConfig {
    /// Files rewritten by `bump-version`
    #[serde(default)]
    pub targets: Vec<VersionTarget>,
}

/// A version declaration: the first line of `path` starting with `prefix`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VersionTarget {
    /// Relative to the project root
    pub path: PathBuf,
    pub prefix: String,
}

impl RutilsConfig {
    /// Load configuration for the current working directory
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("."))
    }

    /// Load configuration, reading the project config from `dir`
    pub fn load_from(dir: &Path) -> Result<Self> {
        let mut figment = Self::defaults();

        // User config - support multiple formats
        if let Some(user_dir) = Self::user_config_dir() {
            figment = figment
                .merge(Toml::file(user_dir.join("config.toml")))
                .merge(Json::file(user_dir.join("config.json")))
                .merge(Yaml::file(user_dir.join("config.yaml")));
        }

        // Project config - support multiple formats
        figment = figment
            .merge(Toml::file(dir.join("rutils.toml")))
            .merge(Json::file(dir.join("rutils.json")))
            .merge(Yaml::file(dir.join("rutils.yaml")));

        Self::extract(figment)
    }

    /// Defaults, then only `custom_config`, then the environment.
    ///
    /// Without a custom config this is [`RutilsConfig::load`].
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        let Some(custom_path) = custom_config else {
            return Self::load();
        };

        let figment = match custom_path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Self::defaults().merge(Json::file(custom_path)),
            Some("yaml" | "yml") => Self::defaults().merge(Yaml::file(custom_path)),
            _ => Self::defaults().merge(Toml::file(custom_path)),
        };

        Self::extract(figment)
    }

    fn defaults() -> Figment {
        Figment::new().merge(Toml::string(DEFAULT_CONFIG))
    }

    fn extract(figment: Figment) -> Result<Self> {
        // Environment variables always have highest priority
        let config: RutilsConfig = figment
            .merge(Env::prefixed("RUTILS_").split("__"))
            .extract()?;
        tracing::debug!("Loaded configuration: {config:?}");
        Ok(config)
    }

    fn user_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rutils"))
    }
}
