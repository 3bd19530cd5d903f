use super::root::{DEFAULT_ROOT_MARKERS, project_root_or_cwd};
use std::panic::Location;
use std::path::Path;

/// Print and return the source file and line of the call site.
///
/// The path is made relative to the project root when possible, see
/// [`relative_file_path`].
///
/// ```
/// let (file, line) = rutils::process::current_file_and_line();
/// assert!(line > 0);
/// assert!(!file.is_empty());
/// ```
#[track_caller]
pub fn current_file_and_line() -> (String, u32) {
    let caller = Location::caller();
    let file = relative_file_path(caller.file());
    let line = caller.line();

    println!("{file}: {line}");
    (file, line)
}

/// Express `path` relative to the project root, with `/` separators.
///
/// Relative paths are already rooted at the crate (that is what `file!()`
/// and [`Location`] report) and are returned unchanged. Absolute paths
/// outside the project root are returned as they are.
pub fn relative_file_path<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();
    if path.is_relative() {
        return to_posix(path);
    }

    match project_root_or_cwd(&DEFAULT_ROOT_MARKERS) {
        Ok(root) => relative_file_path_from(path, &root),
        Err(_) => to_posix(path),
    }
}

/// Like [`relative_file_path`], with an explicit root
pub fn relative_file_path_from(path: &Path, root: &Path) -> String {
    match path.strip_prefix(root) {
        Ok(relative) => to_posix(relative),
        Err(_) => to_posix(path),
    }
}

fn to_posix(path: &Path) -> String {
    let text = path.to_string_lossy();
    if std::path::MAIN_SEPARATOR == '/' {
        text.into_owned()
    } else {
        text.replace(std::path::MAIN_SEPARATOR, "/")
    }
}
