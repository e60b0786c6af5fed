//! Rules evaluated against one file at a time, issuing immediately.

use regex::Regex;

use crate::error::Result;
use crate::scanner::SourceFile;

use super::issue::{Issue, RuleIdentity};
use super::matching::{
    ScanMode, compile_optional, first_match_line, matching_lines, read_document,
};
use super::path_filter::PathFilter;
use super::{RuleSettings, SingleFileRule};

/// Line-oriented match: one issue per physical line containing a match.
#[derive(Debug)]
pub struct SimpleTextMatch {
    settings: RuleSettings,
    expression: Option<Regex>,
    paths: PathFilter,
}

impl SimpleTextMatch {
    /// # Errors
    /// Returns an error if the expression or file pattern is invalid.
    pub fn new(
        settings: RuleSettings,
        expression: Option<&str>,
        file_pattern: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            expression: compile_optional(&settings.identity.key, expression, ScanMode::Lines)?,
            paths: PathFilter::new(file_pattern)?,
            settings,
        })
    }
}

impl SingleFileRule for SimpleTextMatch {
    fn identity(&self) -> &RuleIdentity {
        &self.settings.identity
    }

    fn evaluate(&self, file: &SourceFile, project_key: &str) -> Result<Vec<Issue>> {
        let Some(regex) = &self.expression else {
            return Ok(Vec::new());
        };
        if !self.settings.applies_to(&self.paths, file, project_key) {
            return Ok(Vec::new());
        }

        Ok(matching_lines(file, regex)?
            .into_iter()
            .map(|line| self.settings.issue(file, line))
            .collect())
    }
}

/// Whole-document match with `.` spanning newlines; issues at most once per
/// file, on the line of the first match.
#[derive(Debug)]
pub struct MultilineTextMatch {
    settings: RuleSettings,
    expression: Option<Regex>,
    paths: PathFilter,
}

impl MultilineTextMatch {
    /// # Errors
    /// Returns an error if the expression or file pattern is invalid.
    pub fn new(
        settings: RuleSettings,
        expression: Option<&str>,
        file_pattern: Option<&str>,
    ) -> Result<Self> {
        Ok(Self {
            expression: compile_optional(&settings.identity.key, expression, ScanMode::Document)?,
            paths: PathFilter::new(file_pattern)?,
            settings,
        })
    }
}

impl SingleFileRule for MultilineTextMatch {
    fn identity(&self) -> &RuleIdentity {
        &self.settings.identity
    }

    fn evaluate(&self, file: &SourceFile, project_key: &str) -> Result<Vec<Issue>> {
        let Some(regex) = &self.expression else {
            return Ok(Vec::new());
        };
        if !self.settings.applies_to(&self.paths, file, project_key) {
            return Ok(Vec::new());
        }
        let Some(content) = read_document(file, &self.settings.identity)? else {
            return Ok(Vec::new());
        };

        Ok(first_match_line(&content, regex)
            .map(|line| self.settings.issue(file, line))
            .into_iter()
            .collect())
    }
}

/// "When A is present B must also be present", within one document.
#[derive(Debug)]
pub struct RequiredStringNotPresent {
    settings: RuleSettings,
    trigger: Option<Regex>,
    must_exist: Option<Regex>,
    paths: PathFilter,
}

impl RequiredStringNotPresent {
    /// # Errors
    /// Returns an error if either expression or the file pattern is invalid.
    pub fn new(
        settings: RuleSettings,
        trigger_expression: Option<&str>,
        must_exist_expression: Option<&str>,
        file_pattern: Option<&str>,
    ) -> Result<Self> {
        let key = &settings.identity.key;
        Ok(Self {
            trigger: compile_optional(key, trigger_expression, ScanMode::Document)?,
            must_exist: compile_optional(key, must_exist_expression, ScanMode::Document)?,
            paths: PathFilter::new(file_pattern)?,
            settings,
        })
    }
}

impl SingleFileRule for RequiredStringNotPresent {
    fn identity(&self) -> &RuleIdentity {
        &self.settings.identity
    }

    fn evaluate(&self, file: &SourceFile, project_key: &str) -> Result<Vec<Issue>> {
        let (Some(trigger), Some(must_exist)) = (&self.trigger, &self.must_exist) else {
            return Ok(Vec::new());
        };
        if !self.settings.applies_to(&self.paths, file, project_key) {
            return Ok(Vec::new());
        }
        let Some(content) = read_document(file, &self.settings.identity)? else {
            return Ok(Vec::new());
        };

        let Some(line) = first_match_line(&content, trigger) else {
            return Ok(Vec::new());
        };
        if must_exist.is_match(&content) {
            return Ok(Vec::new());
        }
        Ok(vec![self.settings.issue(file, line)])
    }
}

#[cfg(test)]
#[path = "single_tests.rs"]
mod tests;
