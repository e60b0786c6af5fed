//! Regex evaluation shared by single-file and cross-file rules.

use regex::{Regex, RegexBuilder};

use crate::error::{Result, TextGuardError};
use crate::reader::{BoundedRead, MAX_CHARACTERS_SCANNED, read_file_bounded, tolerant_lines};
use crate::scanner::SourceFile;

use super::issue::RuleIdentity;

/// Upper bound on the compiled size of a single rule regex.
pub const REGEX_SIZE_LIMIT: usize = 10 * (1 << 20);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanMode {
    /// One physical line at a time; `^` and `$` anchor to the line.
    Lines,
    /// The whole file as one string with `.` matching newlines.
    Document,
}

impl ScanMode {
    #[must_use]
    pub const fn from_line_by_line(line_by_line: bool) -> Self {
        if line_by_line { Self::Lines } else { Self::Document }
    }
}

/// Compile `pattern` for `mode`.
///
/// # Errors
/// Returns an error if the pattern is invalid or exceeds the size limit.
pub fn compile_regex(rule: &str, pattern: &str, mode: ScanMode) -> Result<Regex> {
    RegexBuilder::new(pattern)
        .dot_matches_new_line(mode == ScanMode::Document)
        .size_limit(REGEX_SIZE_LIMIT)
        .build()
        .map_err(|source| TextGuardError::InvalidRegex {
            rule: rule.to_string(),
            pattern: pattern.to_string(),
            source,
        })
}

/// Compile an optional rule expression. An absent expression leaves the
/// rule part inert.
///
/// # Errors
/// Returns an error if a present pattern fails to compile.
pub fn compile_optional(
    rule: &str,
    pattern: Option<&str>,
    mode: ScanMode,
) -> Result<Option<Regex>> {
    pattern
        .map(|pattern| compile_regex(rule, pattern, mode))
        .transpose()
}

/// 1-based line containing byte `offset`: one plus the newlines strictly
/// before it. Offsets past the end resolve to the last line.
#[must_use]
pub fn line_number_at(content: &str, offset: usize) -> usize {
    let end = offset.min(content.len());
    1 + content.as_bytes()[..end]
        .iter()
        .filter(|&&b| b == b'\n')
        .count()
}

/// Line numbers of every physical line in `file` that contains a match.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn matching_lines(file: &SourceFile, regex: &Regex) -> Result<Vec<usize>> {
    let mut lines = Vec::new();
    for (index, line) in tolerant_lines(file.path())?.enumerate() {
        let line = line.map_err(|e| TextGuardError::file_read(file.path(), e))?;
        if regex.is_match(&line) {
            lines.push(index + 1);
        }
    }
    Ok(lines)
}

/// Line of the first match in `content`, if any.
#[must_use]
pub fn first_match_line(content: &str, regex: &Regex) -> Option<usize> {
    regex
        .find(content)
        .map(|found| line_number_at(content, found.start()))
}

/// Read `file` whole for document-mode matching. A file over the character
/// budget is logged and skipped with `None`.
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn read_document(file: &SourceFile, rule: &RuleIdentity) -> Result<Option<String>> {
    read_document_within(file, rule, MAX_CHARACTERS_SCANNED)
}

pub(crate) fn read_document_within(
    file: &SourceFile,
    rule: &RuleIdentity,
    max_chars: usize,
) -> Result<Option<String>> {
    match read_file_bounded(file.path(), max_chars)? {
        BoundedRead::Content(content) => Ok(Some(content)),
        BoundedRead::TooLarge => {
            log::warn!(
                "Rule {rule}: maximum scan depth ({} chars) reached for file '{}'; file not checked",
                max_chars - 1,
                file.absolute_path().display()
            );
            Ok(None)
        }
    }
}

#[cfg(test)]
#[path = "matching_tests.rs"]
mod tests;
