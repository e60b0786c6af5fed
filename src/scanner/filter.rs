use std::path::Path;

use globset::{Glob, GlobSet, GlobSetBuilder};

use crate::error::{Result, TextGuardError};

pub trait FileFilter {
    fn should_include(&self, path: &Path) -> bool;

    /// Whether `path` is rejected by exclude patterns alone.
    fn is_excluded(&self, _path: &Path) -> bool {
        false
    }
}

/// Selects in-scope files by name suffix (e.g. `.properties`, `.txt`) and
/// drops anything matching an exclude glob.
pub struct SuffixFilter {
    suffixes: Vec<String>,
    exclude_patterns: GlobSet,
}

impl SuffixFilter {
    /// Create a new filter with the given suffixes and exclude patterns.
    ///
    /// # Errors
    /// Returns an error if any exclude pattern is invalid.
    pub fn new(suffixes: &[String], exclude_patterns: &[String]) -> Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in exclude_patterns {
            let glob = Glob::new(pattern).map_err(|e| TextGuardError::InvalidPattern {
                pattern: pattern.clone(),
                source: e,
            })?;
            builder.add(glob);
        }
        let exclude_patterns = builder
            .build()
            .map_err(|e| TextGuardError::InvalidPattern {
                pattern: "combined patterns".to_string(),
                source: e,
            })?;

        Ok(Self {
            suffixes: normalize_suffixes(suffixes),
            exclude_patterns,
        })
    }

    fn has_valid_suffix(&self, path: &Path) -> bool {
        if self.suffixes.is_empty() {
            return true;
        }

        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.suffixes.iter().any(|s| name.ends_with(s.as_str())))
    }
}

impl FileFilter for SuffixFilter {
    fn should_include(&self, path: &Path) -> bool {
        self.has_valid_suffix(path) && !self.is_excluded(path)
    }

    fn is_excluded(&self, path: &Path) -> bool {
        self.exclude_patterns.is_match(path)
            || self
                .exclude_patterns
                .is_match(super::normalize_for_matching(path))
    }
}

/// Trim suffixes, drop blanks, and make sure each starts with a dot.
#[must_use]
pub fn normalize_suffixes(suffixes: &[String]) -> Vec<String> {
    suffixes
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| {
            if s.starts_with('.') {
                s.to_string()
            } else {
                format!(".{s}")
            }
        })
        .collect()
}

#[cfg(test)]
#[path = "filter_tests.rs"]
mod tests;
