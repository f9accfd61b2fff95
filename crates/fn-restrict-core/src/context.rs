//! Context types for sniff execution.

use std::path::{Path, PathBuf};

/// Context provided to sniffs for the file being scanned.
#[derive(Debug, Clone)]
pub struct FileContext {
    /// Path relative to the project root, as reported in violations.
    pub relative_path: PathBuf,
}

impl FileContext {
    /// Creates a context for `path`, reported relative to `root`.
    #[must_use]
    pub fn new(path: &Path, root: &Path) -> Self {
        let relative_path = path
            .strip_prefix(root)
            .map_or_else(|_| path.to_path_buf(), Path::to_path_buf);

        Self { relative_path }
    }
}
