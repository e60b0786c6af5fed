mod builder;
mod cross_file;
mod issue;
mod ledger;
mod matching;
mod path_filter;
mod single;

pub use builder::build_checks;
pub use cross_file::{BothMustExist, DisallowedIfMatchElsewhere, is_rule_trigger_present};
pub use issue::{Issue, MatchKind, PreliminaryMatch, RuleIdentity};
pub use ledger::MatchLedger;
pub use matching::{
    REGEX_SIZE_LIMIT, ScanMode, compile_regex, first_match_line, line_number_at, matching_lines,
    read_document,
};
pub use path_filter::{Exclusions, PathFilter};
pub use single::{MultilineTextMatch, RequiredStringNotPresent, SimpleTextMatch};

use crate::error::Result;
use crate::scanner::SourceFile;

/// A rule that decides on each file in isolation.
pub trait SingleFileRule: Send + Sync {
    fn identity(&self) -> &RuleIdentity;

    /// Issues for `file`. An inert or non-applicable rule returns none.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn evaluate(&self, file: &SourceFile, project_key: &str) -> Result<Vec<Issue>>;
}

/// A rule whose issues depend on matches across the whole scan.
pub trait CrossFileRule: Send + Sync {
    fn identity(&self) -> &RuleIdentity;

    /// Phase 1: append this rule's matches in `file` to `ledger`.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    fn record(&self, file: &SourceFile, project_key: &str, ledger: &mut MatchLedger)
    -> Result<()>;

    /// Phase 2: turn the recorded matches into issues. Called once, after
    /// every file has been recorded.
    fn finalize(&self, ledger: &MatchLedger) -> Vec<FileIssues>;
}

/// A configured rule, dispatched by shape.
pub enum Check {
    Single(Box<dyn SingleFileRule>),
    CrossFile(Box<dyn CrossFileRule>),
}

impl Check {
    #[must_use]
    pub fn identity(&self) -> &RuleIdentity {
        match self {
            Self::Single(rule) => rule.identity(),
            Self::CrossFile(rule) => rule.identity(),
        }
    }

    #[must_use]
    pub const fn is_cross_file(&self) -> bool {
        matches!(self, Self::CrossFile(_))
    }
}

impl std::fmt::Debug for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(rule) => f.debug_tuple("Single").field(rule.identity()).finish(),
            Self::CrossFile(rule) => f.debug_tuple("CrossFile").field(rule.identity()).finish(),
        }
    }
}

/// Issues raised against one file during finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileIssues {
    pub file: SourceFile,
    pub issues: Vec<Issue>,
}

impl FileIssues {
    #[must_use]
    pub const fn new(file: SourceFile, issues: Vec<Issue>) -> Self {
        Self { file, issues }
    }
}

/// Identity, message and exclusions common to every rule kind.
#[derive(Debug, Clone)]
pub struct RuleSettings {
    pub identity: RuleIdentity,
    pub message: String,
    pub exclusions: Exclusions,
}

impl RuleSettings {
    #[must_use]
    pub fn new(identity: RuleIdentity, message: impl Into<String>) -> Self {
        Self {
            identity,
            message: message.into(),
            exclusions: Exclusions::default(),
        }
    }

    #[must_use]
    pub fn with_exclusions(mut self, exclusions: Exclusions) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// True if the project key or the file's base name suppresses this rule.
    #[must_use]
    pub fn excluded(&self, file: &SourceFile, project_key: &str) -> bool {
        let excluded = self.exclusions.excludes(project_key, file.file_name());
        if excluded {
            log::debug!(
                "Rule {} suppressed for {} (project key '{project_key}')",
                self.identity,
                file.display_path()
            );
        }
        excluded
    }

    fn applies_to(&self, paths: &PathFilter, file: &SourceFile, project_key: &str) -> bool {
        if !paths.included(file.logical_path()) {
            log::debug!(
                "Rule {} skips {}: not matched by file pattern",
                self.identity,
                file.display_path()
            );
            return false;
        }
        !self.excluded(file, project_key)
    }

    fn issue(&self, file: &SourceFile, line: usize) -> Issue {
        Issue::new(self.identity.clone(), file.clone(), line, self.message.clone())
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
