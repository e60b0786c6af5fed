use std::fmt;

use serde::Serialize;

use crate::scanner::SourceFile;

/// Identifies one configured rule instance: several rules of the same kind
/// can be active at once with different settings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RuleIdentity {
    pub repository: String,
    pub key: String,
}

impl RuleIdentity {
    #[must_use]
    pub fn new(repository: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            repository: repository.into(),
            key: key.into(),
        }
    }
}

impl fmt::Display for RuleIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.key)
    }
}

/// Which half of a cross-file rule recorded a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchKind {
    Trigger,
    Disallow,
    MustAlsoExist,
}

impl MatchKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Disallow => "disallow",
            Self::MustAlsoExist => "must-also-exist",
        }
    }
}

impl fmt::Display for MatchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A phase-1 match waiting for cross-file finalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreliminaryMatch {
    pub kind: MatchKind,
    pub rule: RuleIdentity,
    pub line: usize,
    pub message: String,
}

impl PreliminaryMatch {
    #[must_use]
    pub fn new(kind: MatchKind, rule: RuleIdentity, line: usize, message: impl Into<String>) -> Self {
        Self {
            kind,
            rule,
            line,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is(&self, rule: &RuleIdentity, kind: MatchKind) -> bool {
        self.kind == kind && &self.rule == rule
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Issue {
    pub rule: RuleIdentity,
    pub file: SourceFile,
    pub line: usize,
    pub message: String,
}

impl Issue {
    #[must_use]
    pub fn new(rule: RuleIdentity, file: SourceFile, line: usize, message: impl Into<String>) -> Self {
        Self {
            rule,
            file,
            line,
            message: message.into(),
        }
    }

    /// Promote a recorded match into an issue against `file`.
    #[must_use]
    pub fn from_match(file: &SourceFile, found: &PreliminaryMatch) -> Self {
        Self::new(found.rule.clone(), file.clone(), found.line, found.message.clone())
    }
}

#[cfg(test)]
#[path = "issue_tests.rs"]
mod tests;
