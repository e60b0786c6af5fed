//! Rules whose verdict for one file depends on what other files contain.
//!
//! Every rule runs in two phases. During the scan, [`CrossFileRule::record`]
//! appends each part's matches to the shared [`MatchLedger`]. Once every
//! file has been recorded, [`CrossFileRule::finalize`] reads the ledger,
//! filtered to the rule's own identity, and decides which matches become
//! issues.

use regex::Regex;

use crate::error::Result;
use crate::scanner::SourceFile;

use super::issue::{Issue, MatchKind, PreliminaryMatch, RuleIdentity};
use super::ledger::MatchLedger;
use super::matching::{
    ScanMode, compile_optional, first_match_line, matching_lines, read_document,
};
use super::path_filter::PathFilter;
use super::{CrossFileRule, FileIssues, RuleSettings};

/// One half of a cross-file rule: the expression and the files it is
/// evaluated against.
#[derive(Debug)]
struct RulePart {
    kind: MatchKind,
    expression: Option<Regex>,
    paths: PathFilter,
}

impl RulePart {
    fn new(
        rule: &str,
        kind: MatchKind,
        expression: Option<&str>,
        file_pattern: Option<&str>,
        mode: ScanMode,
    ) -> Result<Self> {
        Ok(Self {
            kind,
            expression: compile_optional(rule, expression, mode)?,
            paths: PathFilter::new(file_pattern)?,
        })
    }

    fn active_for(&self, file: &SourceFile) -> Option<&Regex> {
        let regex = self.expression.as_ref()?;
        if self.paths.included(file.logical_path()) {
            Some(regex)
        } else {
            log::debug!(
                "Skipping {} for {}: not matched by file pattern",
                self.kind,
                file.display_path()
            );
            None
        }
    }
}

/// Phase-1 recording shared by both rule shapes.
#[derive(Debug)]
struct PartRecorder {
    settings: RuleSettings,
    mode: ScanMode,
    parts: [RulePart; 2],
}

impl PartRecorder {
    fn record(&self, file: &SourceFile, project_key: &str, ledger: &mut MatchLedger) -> Result<()> {
        if self.settings.excluded(file, project_key) {
            return Ok(());
        }

        let active: Vec<(MatchKind, &Regex)> = self
            .parts
            .iter()
            .filter_map(|part| part.active_for(file).map(|regex| (part.kind, regex)))
            .collect();
        if active.is_empty() {
            return Ok(());
        }

        match self.mode {
            ScanMode::Lines => {
                for (kind, regex) in active {
                    for line in matching_lines(file, regex)? {
                        self.push(ledger, file, kind, line);
                    }
                }
            }
            ScanMode::Document => {
                // One read serves both parts, so an oversized file is reported once.
                let Some(content) = read_document(file, &self.settings.identity)? else {
                    return Ok(());
                };
                for (kind, regex) in active {
                    if let Some(line) = first_match_line(&content, regex) {
                        self.push(ledger, file, kind, line);
                    }
                }
            }
        }
        Ok(())
    }

    fn push(&self, ledger: &mut MatchLedger, file: &SourceFile, kind: MatchKind, line: usize) {
        ledger.record(
            file,
            PreliminaryMatch::new(
                kind,
                self.settings.identity.clone(),
                line,
                self.settings.message.clone(),
            ),
        );
    }

    /// Issue every `kind` entry of this rule, grouped by file in ledger order.
    fn issue_all(&self, ledger: &MatchLedger, kind: MatchKind) -> Vec<FileIssues> {
        let rule = &self.settings.identity;
        ledger
            .iter()
            .filter_map(|(file, matches)| {
                let issues: Vec<Issue> = matches
                    .iter()
                    .filter(|found| found.is(rule, kind))
                    .map(|found| Issue::from_match(file, found))
                    .collect();
                (!issues.is_empty()).then(|| FileIssues::new(file.clone(), issues))
            })
            .collect()
    }
}

/// True if any file recorded a trigger match for `rule`.
#[must_use]
pub fn is_rule_trigger_present(ledger: &MatchLedger, rule: &RuleIdentity) -> bool {
    ledger.has_match(rule, MatchKind::Trigger)
}

/// Report every disallowed match in the project. Trigger matches are
/// recorded but never issued and do not gate the disallow matches.
#[derive(Debug)]
pub struct DisallowedIfMatchElsewhere {
    recorder: PartRecorder,
}

impl DisallowedIfMatchElsewhere {
    /// # Errors
    /// Returns an error if an expression or file pattern is invalid.
    pub fn new(
        settings: RuleSettings,
        trigger: (Option<&str>, Option<&str>),
        disallow: (Option<&str>, Option<&str>),
        line_by_line: bool,
    ) -> Result<Self> {
        let mode = ScanMode::from_line_by_line(line_by_line);
        let key = &settings.identity.key;
        let parts = [
            RulePart::new(key, MatchKind::Trigger, trigger.0, trigger.1, mode)?,
            RulePart::new(key, MatchKind::Disallow, disallow.0, disallow.1, mode)?,
        ];
        Ok(Self {
            recorder: PartRecorder {
                settings,
                mode,
                parts,
            },
        })
    }
}

impl CrossFileRule for DisallowedIfMatchElsewhere {
    fn identity(&self) -> &RuleIdentity {
        &self.recorder.settings.identity
    }

    fn record(&self, file: &SourceFile, project_key: &str, ledger: &mut MatchLedger) -> Result<()> {
        self.recorder.record(file, project_key, ledger)
    }

    fn finalize(&self, ledger: &MatchLedger) -> Vec<FileIssues> {
        self.recorder.issue_all(ledger, MatchKind::Disallow)
    }
}

/// If the trigger appears somewhere, the must-also-exist expression has to
/// appear somewhere too; otherwise each trigger line is reported.
#[derive(Debug)]
pub struct BothMustExist {
    recorder: PartRecorder,
}

impl BothMustExist {
    /// # Errors
    /// Returns an error if an expression or file pattern is invalid.
    pub fn new(
        settings: RuleSettings,
        trigger: (Option<&str>, Option<&str>),
        must_also_exist: (Option<&str>, Option<&str>),
        line_by_line: bool,
    ) -> Result<Self> {
        let mode = ScanMode::from_line_by_line(line_by_line);
        let key = &settings.identity.key;
        let parts = [
            RulePart::new(key, MatchKind::Trigger, trigger.0, trigger.1, mode)?,
            RulePart::new(
                key,
                MatchKind::MustAlsoExist,
                must_also_exist.0,
                must_also_exist.1,
                mode,
            )?,
        ];
        Ok(Self {
            recorder: PartRecorder {
                settings,
                mode,
                parts,
            },
        })
    }
}

impl CrossFileRule for BothMustExist {
    fn identity(&self) -> &RuleIdentity {
        &self.recorder.settings.identity
    }

    fn record(&self, file: &SourceFile, project_key: &str, ledger: &mut MatchLedger) -> Result<()> {
        self.recorder.record(file, project_key, ledger)
    }

    fn finalize(&self, ledger: &MatchLedger) -> Vec<FileIssues> {
        let rule = self.identity();
        if !is_rule_trigger_present(ledger, rule) {
            return Vec::new();
        }
        if ledger.has_match(rule, MatchKind::MustAlsoExist) {
            log::debug!("Rule {rule}: trigger satisfied by a must-also-exist match");
            return Vec::new();
        }
        self.recorder.issue_all(ledger, MatchKind::Trigger)
    }
}

#[cfg(test)]
#[path = "cross_file_tests.rs"]
mod tests;
