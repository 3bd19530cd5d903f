//! Introspection of the running process: memory usage, caller location and
//! project root discovery

pub mod location;
pub mod memory;
pub mod root;

pub use location::{current_file_and_line, relative_file_path, relative_file_path_from};
pub use memory::{resident_memory, used_mem};
pub use root::{DEFAULT_ROOT_MARKERS, find_project_root, project_root_or_cwd};
