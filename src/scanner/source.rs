//! Scanned-file identity.
//!
//! A `SourceFile` pairs the path used to open the file with the logical,
//! `/`-separated path that rule globs are matched against. Equality and
//! hashing cover both, so the same file reached through two roots stays
//! distinct in the match ledger.

use std::fs::File;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceFile {
    logical_path: String,
    path: PathBuf,
}

impl SourceFile {
    #[must_use]
    pub fn new(logical_path: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            logical_path: logical_path.into(),
            path: path.into(),
        }
    }

    /// A file found by walking `root`; its logical path is relative to `root`.
    #[must_use]
    pub fn under_root(root: &Path, path: PathBuf) -> Self {
        let logical = relative_logical_path(&path, root);
        Self::new(logical, path)
    }

    /// A file named directly on the command line.
    #[must_use]
    pub fn explicit(path: PathBuf) -> Self {
        let logical = normalize_for_matching(&path).to_string_lossy().into_owned();
        Self::new(logical, path)
    }

    /// Path matched against rule globs.
    #[must_use]
    pub fn logical_path(&self) -> &str {
        &self.logical_path
    }

    /// Path used to open the file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Base name of the file, used by file-name exclusions.
    #[must_use]
    pub fn file_name(&self) -> &str {
        self.logical_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.logical_path)
    }

    /// Path shown in reports, relative to the scanned root.
    #[must_use]
    pub fn display_path(&self) -> String {
        self.logical_path.clone()
    }

    /// Absolute path for diagnostics; falls back to the scanned path.
    #[must_use]
    pub fn absolute_path(&self) -> PathBuf {
        dunce::canonicalize(&self.path).unwrap_or_else(|_| self.path.clone())
    }

    /// Open the file for reading.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened.
    pub fn open(&self) -> std::io::Result<File> {
        File::open(&self.path)
    }
}

/// `path` relative to `root`, with forward slashes and no leading `./`.
#[must_use]
pub fn relative_logical_path(path: &Path, root: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let normalized = normalize_for_matching(relative);
    if normalized.as_os_str().is_empty() {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    } else {
        normalized.to_string_lossy().into_owned()
    }
}

/// Normalize path separators to forward slashes.
#[must_use]
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Strip a leading `./` (or `.\`) and normalize separators so globs match
/// regardless of how the path was spelled.
#[must_use]
pub fn normalize_for_matching(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();

    let stripped = path_str
        .strip_prefix("./")
        .or_else(|| path_str.strip_prefix(".\\"))
        .unwrap_or(&path_str);

    if stripped.is_empty() || stripped == "." {
        return PathBuf::new();
    }

    if stripped.contains('\\') {
        PathBuf::from(normalize_separators(stripped))
    } else {
        PathBuf::from(stripped)
    }
}

#[cfg(test)]
#[path = "source_tests.rs"]
mod tests;
