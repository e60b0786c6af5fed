mod filter;
mod source;

pub use filter::{FileFilter, SuffixFilter, normalize_suffixes};
pub use source::{SourceFile, normalize_for_matching, normalize_separators, relative_logical_path};

use std::path::{Path, PathBuf};

use indexmap::IndexSet;
use walkdir::WalkDir;

use crate::error::{Result, TextGuardError};

/// Trait for scanning directories and finding files.
pub trait FileScanner {
    /// Scan a directory and return all matching file paths.
    ///
    /// # Errors
    /// Returns an error if the directory cannot be read.
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

pub struct DirectoryScanner<F: FileFilter> {
    filter: F,
}

impl<F: FileFilter> DirectoryScanner<F> {
    #[must_use]
    pub const fn new(filter: F) -> Self {
        Self { filter }
    }

    #[must_use]
    pub const fn filter(&self) -> &F {
        &self.filter
    }

    fn scan_impl(&self, root: &Path) -> Vec<PathBuf> {
        WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry),
                Err(e) => {
                    log::warn!("Skipping unreadable entry under {}: {e}", root.display());
                    None
                }
            })
            .filter(|e| e.file_type().is_file())
            .map(|e| e.path().to_path_buf())
            .filter(|p| self.filter.should_include(p))
            .collect()
    }

    /// Resolve command-line paths into the ordered list of files to scan.
    ///
    /// Directories are walked and filtered; an explicit file bypasses the
    /// suffix check but still honours exclude patterns. Duplicates are
    /// dropped, keeping the first occurrence.
    ///
    /// # Errors
    /// Returns an error if a path does not exist.
    pub fn collect_sources(&self, paths: &[PathBuf]) -> Result<Vec<SourceFile>> {
        let mut sources: IndexSet<SourceFile> = IndexSet::new();
        for path in paths {
            if path.is_file() {
                if self.filter.is_excluded(path) {
                    log::debug!("Excluded by pattern: {}", path.display());
                    continue;
                }
                sources.insert(SourceFile::explicit(path.clone()));
            } else if path.is_dir() {
                for file in self.scan(path)? {
                    sources.insert(SourceFile::under_root(path, file));
                }
            } else {
                return Err(TextGuardError::file_read(
                    path.clone(),
                    std::io::Error::new(std::io::ErrorKind::NotFound, "path does not exist"),
                ));
            }
        }
        Ok(sources.into_iter().collect())
    }
}

impl<F: FileFilter> FileScanner for DirectoryScanner<F> {
    fn scan(&self, root: &Path) -> Result<Vec<PathBuf>> {
        Ok(self.scan_impl(root))
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
