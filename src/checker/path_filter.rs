//! File inclusion by Ant-style glob and rule suppression by exclusion regex.

use globset::{GlobBuilder, GlobMatcher};
use regex::Regex;

use crate::error::{Result, TextGuardError};

use super::matching::{ScanMode, compile_regex};

/// Ant-style path glob: `*` stays inside one segment, `**` spans segments.
/// An absent pattern includes every file; a blank one includes none.
#[derive(Debug, Clone, Default)]
pub struct PathFilter {
    scope: Scope,
}

#[derive(Debug, Clone, Default)]
enum Scope {
    #[default]
    All,
    Nothing,
    Glob(GlobMatcher),
}

impl PathFilter {
    /// # Errors
    /// Returns an error if `pattern` is not a valid glob.
    pub fn new(pattern: Option<&str>) -> Result<Self> {
        let scope = match pattern.map(str::trim) {
            None => Scope::All,
            Some("") => Scope::Nothing,
            Some(pattern) => Scope::Glob(
                GlobBuilder::new(pattern)
                    .literal_separator(true)
                    .build()
                    .map_err(|source| TextGuardError::InvalidPattern {
                        pattern: pattern.to_string(),
                        source,
                    })?
                    .compile_matcher(),
            ),
        };
        Ok(Self { scope })
    }

    #[must_use]
    pub fn included(&self, logical_path: &str) -> bool {
        match &self.scope {
            Scope::All => true,
            Scope::Nothing => false,
            Scope::Glob(matcher) => matcher.is_match(logical_path),
        }
    }
}

/// Project-key and file-name exclusion regexes shared by every part of a rule.
#[derive(Debug, Clone, Default)]
pub struct Exclusions {
    project_keys: Option<Regex>,
    file_names: Option<Regex>,
}

impl Exclusions {
    /// # Errors
    /// Returns an error if either regex fails to compile.
    pub fn new(rule: &str, project_keys: Option<&str>, file_names: Option<&str>) -> Result<Self> {
        Ok(Self {
            project_keys: compile_exclusion(rule, project_keys)?,
            file_names: compile_exclusion(rule, file_names)?,
        })
    }

    #[must_use]
    pub fn excluded_by_project_key(&self, project_key: &str) -> bool {
        self.project_keys
            .as_ref()
            .is_some_and(|regex| regex.is_match(project_key))
    }

    /// Matched against the file's base name only, never its full path.
    #[must_use]
    pub fn excluded_by_file_name(&self, file_name: &str) -> bool {
        self.file_names
            .as_ref()
            .is_some_and(|regex| regex.is_match(file_name))
    }

    #[must_use]
    pub fn excludes(&self, project_key: &str, file_name: &str) -> bool {
        self.excluded_by_project_key(project_key) || self.excluded_by_file_name(file_name)
    }
}

fn compile_exclusion(rule: &str, pattern: Option<&str>) -> Result<Option<Regex>> {
    match pattern.filter(|p| !p.trim().is_empty()) {
        Some(pattern) => compile_regex(rule, pattern, ScanMode::Lines).map(Some),
        None => Ok(None),
    }
}

#[cfg(test)]
#[path = "path_filter_tests.rs"]
mod tests;
