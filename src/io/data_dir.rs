use std::path::{Path, PathBuf};

/// Name of the data directory that marks a dayplan workspace.
pub const DATA_DIR_NAME: &str = ".dayplan";

/// Error type for data-directory discovery
#[derive(Debug, thiserror::Error)]
pub enum DataDirError {
    #[error("no {DATA_DIR_NAME}/ directory found here or in any parent; run `dp init`")]
    NotFound,
    #[error("cannot resolve path '{path}': {source}")]
    BadPath {
        path: String,
        source: std::io::Error,
    },
}

/// Discover the data directory by walking up from `start` looking for a
/// `.dayplan/` subdirectory.
pub fn discover_data_dir(start: &Path) -> Result<PathBuf, DataDirError> {
    let mut current = start.to_path_buf();
    loop {
        let candidate = current.join(DATA_DIR_NAME);
        if candidate.is_dir() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(DataDirError::NotFound);
        }
    }
}

/// Resolve the data directory for a command: an explicit `-C` root when
/// given, otherwise discovery from the working directory.
pub fn resolve_data_dir(override_root: Option<&str>) -> Result<PathBuf, DataDirError> {
    let start = match override_root {
        Some(root) => std::fs::canonicalize(root).map_err(|e| DataDirError::BadPath {
            path: root.to_string(),
            source: e,
        })?,
        None => std::env::current_dir().map_err(|e| DataDirError::BadPath {
            path: ".".to_string(),
            source: e,
        })?,
    };
    discover_data_dir(&start)
}
