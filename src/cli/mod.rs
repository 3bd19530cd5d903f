//! The `bump-version` command

use crate::config::RutilsConfig;
use crate::process::project_root_or_cwd;
use crate::version::{BumpKind, bump_targets};
use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "bump-version",
    version = env!("CARGO_PKG_VERSION"),
    about = "Bump the semantic version declared in the project files"
)]
pub struct Cli {
    /// Which version component to increment
    #[arg(value_enum)]
    pub kind: BumpKind,

    /// Run as if started in <DIR> instead of current working directory
    #[arg(short = 'C', long = "directory")]
    pub directory: Option<PathBuf>,

    /// Increase verbosity (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all log output
    #[arg(short, long)]
    pub quiet: bool,

    /// Use custom configuration file
    #[arg(long, value_name = "FILE", env = "RUTILS_CONFIG")]
    pub config: Option<PathBuf>,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)
                .with_context(|| format!("Failed to change directory to {}", dir.display()))?;
        }

        setup_logging(self.verbose, self.quiet);

        // Root markers are configurable; the root's own rutils.toml is read second
        let config = RutilsConfig::load_with_custom_config(self.config.as_deref())
            .context("Failed to load configuration")?;
        let root = project_root_or_cwd(&config.project.root_markers)?;
        let config = match &self.config {
            Some(_) => config,
            None => RutilsConfig::load_from(&root).context("Failed to load configuration")?,
        };

        tracing::debug!("Bumping {} version in {}", self.kind, root.display());
        let changes = bump_targets(&root, &config.version.targets, self.kind)
            .with_context(|| format!("Failed to bump {} version", self.kind))?;

        if changes.is_empty() {
            tracing::warn!("No version declaration was updated");
        }
        Ok(())
    }
}

fn setup_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }

    let filter = tracing_subscriber::EnvFilter::try_from_env("RUTILS_LOG").unwrap_or_else(|_| {
        match verbose {
            0 => tracing_subscriber::EnvFilter::new("warn"),
            1 => tracing_subscriber::EnvFilter::new("info"),
            2 => tracing_subscriber::EnvFilter::new("debug"),
            _ => tracing_subscriber::EnvFilter::new("trace"),
        }
    });

    // A second call (e.g. from tests driving `run` twice) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parses_bump_kind() {
        let cli = Cli::try_parse_from(["bump-version", "minor"]).unwrap();
        assert_eq!(cli.kind, BumpKind::Minor);
        assert_eq!(cli.verbose, 0);

        let cli = Cli::try_parse_from(["bump-version", "-vv", "--config", "x.toml", "patch"]).unwrap();
        assert_eq!(cli.kind, BumpKind::Patch);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(Cli::try_parse_from(["bump-version", "huge"]).is_err());
        assert!(Cli::try_parse_from(["bump-version"]).is_err());
    }
}
