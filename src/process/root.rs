use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Files or directories whose presence marks a project root
pub const DEFAULT_ROOT_MARKERS: [&str; 3] = [".project-root", ".git", "Cargo.lock"];

/// Walk upward from `start` (inclusive) and return the first directory
/// containing any of `markers`.
pub fn find_project_root<M: AsRef<Path>>(start: &Path, markers: &[M]) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| markers.iter().any(|marker| dir.join(marker).exists()))
        .map(Path::to_path_buf)
}

/// Project root above the current directory, or the current directory itself
/// when no marker is found.
pub fn project_root_or_cwd<M: AsRef<Path>>(markers: &[M]) -> Result<PathBuf> {
    let cwd = std::env::current_dir().map_err(|e| Error::io(Path::new("."), e))?;
    match find_project_root(&cwd, markers) {
        Some(root) => Ok(root),
        None => {
            tracing::debug!("No project root marker above {}, using it as root", cwd.display());
            Ok(cwd)
        }
    }
}
