//! Semantic version bumping for the `bump-version` command
//!
//! A version declaration is the first line of a file that starts with a
//! configured prefix, e.g. `version = "` in `Cargo.toml`. The version is the
//! text between the prefix and the next `"`; everything else on the line is
//! kept as is.

use crate::config::VersionTarget;
use crate::error::{Error, Result};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Which component of `MAJOR.MINOR.PATCH` to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpKind {
    /// X.y.z -> (X+1).0.0
    Major,
    /// x.Y.z -> x.(Y+1).0
    Minor,
    /// x.y.Z -> x.y.(Z+1)
    Patch,
}

impl FromStr for BumpKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(Error::invalid_argument(format!(
                "bump kind must be major, minor or patch (got {other:?})"
            ))),
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        };
        f.write_str(name)
    }
}

/// Increment one component of a `MAJOR.MINOR.PATCH` version string.
///
/// ```
/// use rutils::version::{BumpKind, bump_version};
///
/// assert_eq!(bump_version("1.2.3", BumpKind::Minor).unwrap(), "1.3.0");
/// ```
pub fn bump_version(version: &str, kind: BumpKind) -> Result<String> {
    let [major, minor, patch] = parse_version(version)?;
    let next = |component: u64| {
        component.checked_add(1).ok_or_else(|| {
            Error::invalid_argument(format!("cannot bump {kind} component of {version:?}"))
        })
    };
    let bumped = match kind {
        BumpKind::Major => format!("{}.0.0", next(major)?),
        BumpKind::Minor => format!("{major}.{}.0", next(minor)?),
        BumpKind::Patch => format!("{major}.{minor}.{}", next(patch)?),
    };
    Ok(bumped)
}

fn parse_version(version: &str) -> Result<[u64; 3]> {
    let invalid = || Error::invalid_argument(format!("{version:?} is not a MAJOR.MINOR.PATCH version"));

    let parts: Vec<&str> = version.trim().split('.').collect();
    let [major, minor, patch] = parts.as_slice() else {
        return Err(invalid());
    };

    let parse = |part: &str| part.parse::<u64>().map_err(|_| invalid());
    Ok([parse(major)?, parse(minor)?, parse(patch)?])
}

/// Outcome of rewriting one version declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChange {
    pub path: PathBuf,
    pub old: String,
    pub new: String,
}

/// Bump the first line of `content` starting with `prefix`.
///
/// Returns the new content together with the old and new versions, or `None`
/// when no line matches.
pub fn bump_declaration(
    content: &str,
    prefix: &str,
    kind: BumpKind,
) -> Result<Option<(String, String, String)>> {
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        if let Some(rest) = line.strip_prefix(prefix) {
            let Some(end) = rest.find('"') else {
                return Err(Error::invalid_argument(format!(
                    "unterminated version after {prefix:?}"
                )));
            };
            let old = &rest[..end];
            let new = bump_version(old, kind)?;

            let version_start = offset + prefix.len();
            let mut updated = String::with_capacity(content.len() + 2);
            updated.push_str(&content[..version_start]);
            updated.push_str(&new);
            updated.push_str(&content[version_start + end..]);
            return Ok(Some((updated, old.to_string(), new)));
        }
        offset += line.len();
    }
    Ok(None)
}

/// Rewrite the version declaration in `path` in place
pub fn bump_file(path: &Path, prefix: &str, kind: BumpKind) -> Result<Option<VersionChange>> {
    let Some(pending) = prepare_bump(path, prefix, kind)? else {
        return Ok(None);
    };
    pending.write().map(Some)
}

/// A bumped file held in memory until every target is known to succeed
struct PendingBump {
    content: String,
    change: VersionChange,
}

impl PendingBump {
    fn write(self) -> Result<VersionChange> {
        let path = &self.change.path;
        std::fs::write(path, self.content).map_err(|e| Error::io(path, e))?;
        tracing::info!("{}: {} -> {}", path.display(), self.change.old, self.change.new);
        Ok(self.change)
    }
}

fn prepare_bump(path: &Path, prefix: &str, kind: BumpKind) -> Result<Option<PendingBump>> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    let Some((updated, old, new)) = bump_declaration(&content, prefix, kind)? else {
        tracing::warn!("No line starting with {prefix:?} in {}", path.display());
        return Ok(None);
    };

    Ok(Some(PendingBump {
        content: updated,
        change: VersionChange {
            path: path.to_path_buf(),
            old,
            new,
        },
    }))
}

/// Bump every target, resolving relative paths against `root`.
///
/// Nothing is written unless every target reads and bumps cleanly.
pub fn bump_targets(
    root: &Path,
    targets: &[VersionTarget],
    kind: BumpKind,
) -> Result<Vec<VersionChange>> {
    let mut pending = Vec::with_capacity(targets.len());
    for target in targets {
        let path = root.join(&target.path);
        if let Some(bump) = prepare_bump(&path, &target.prefix, kind)? {
            pending.push(bump);
        }
    }

    pending.into_iter().map(PendingBump::write).collect()
}
