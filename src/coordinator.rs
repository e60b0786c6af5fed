//! Drives one scan: every check over every file, then cross-file
//! finalization.
//!
//! Phase 1 evaluates single-file rules and records cross-file matches, one
//! file at a time (optionally in parallel). Each file records into its own
//! ledger fragment; fragments are merged in enumeration order once every
//! file is done, so phase 2 always sees a complete ledger. A failing
//! (check, file) pair is logged and contributes nothing; the scan goes on.

use rayon::prelude::*;

use crate::checker::{Check, CrossFileRule, Issue, MatchLedger, RuleIdentity, SingleFileRule};
use crate::error::TextGuardError;
use crate::scanner::SourceFile;

/// Receives every finalized issue.
pub trait IssueSink {
    fn accept(&mut self, issue: Issue);
}

impl IssueSink for Vec<Issue> {
    fn accept(&mut self, issue: Issue) {
        self.push(issue);
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanSummary {
    pub files: usize,
    pub checks: usize,
    pub issues: usize,
    /// (check, file) pairs that failed and were skipped.
    pub failures: usize,
}

#[derive(Debug, Default)]
struct FileOutcome {
    issues: Vec<Issue>,
    ledger: MatchLedger,
    failures: usize,
}

pub struct ScanCoordinator<'a> {
    checks: &'a [Check],
    project_key: &'a str,
    parallel: bool,
}

impl<'a> ScanCoordinator<'a> {
    #[must_use]
    pub const fn new(checks: &'a [Check], project_key: &'a str) -> Self {
        Self {
            checks,
            project_key,
            parallel: true,
        }
    }

    #[must_use]
    pub const fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Run every check over `files` and push the resulting issues to `sink`.
    pub fn run(&self, files: &[SourceFile], sink: &mut dyn IssueSink) -> ScanSummary {
        log::info!(
            "Scanning {} files with {} rules",
            files.len(),
            self.checks.len()
        );

        let outcomes: Vec<FileOutcome> = if self.parallel {
            files.par_iter().map(|file| self.scan_file(file)).collect()
        } else {
            files.iter().map(|file| self.scan_file(file)).collect()
        };

        let mut summary = ScanSummary {
            files: files.len(),
            checks: self.checks.len(),
            ..ScanSummary::default()
        };
        let mut ledger = MatchLedger::new();
        for outcome in outcomes {
            summary.failures += outcome.failures;
            for issue in outcome.issues {
                summary.issues += 1;
                sink.accept(issue);
            }
            ledger.merge(outcome.ledger);
        }

        for check in self.checks {
            if let Check::CrossFile(rule) = check {
                for touched in rule.finalize(&ledger) {
                    for issue in touched.issues {
                        summary.issues += 1;
                        sink.accept(issue);
                    }
                }
            }
        }

        log::info!(
            "Scan finished: {} files, {} rules, {} issues, {} failures",
            summary.files,
            summary.checks,
            summary.issues,
            summary.failures
        );
        summary
    }

    fn scan_file(&self, file: &SourceFile) -> FileOutcome {
        let mut outcome = FileOutcome::default();
        for check in self.checks {
            let result = match check {
                Check::Single(rule) => self.evaluate(rule.as_ref(), file, &mut outcome.issues),
                Check::CrossFile(rule) => self.record(rule.as_ref(), file, &mut outcome.ledger),
            };
            if let Err(error) = result {
                report_failure(check.identity(), file, &error);
                outcome.failures += 1;
            }
        }
        outcome
    }

    fn evaluate(
        &self,
        rule: &dyn SingleFileRule,
        file: &SourceFile,
        issues: &mut Vec<Issue>,
    ) -> crate::Result<()> {
        issues.extend(rule.evaluate(file, self.project_key)?);
        Ok(())
    }

    fn record(
        &self,
        rule: &dyn CrossFileRule,
        file: &SourceFile,
        ledger: &mut MatchLedger,
    ) -> crate::Result<()> {
        // A failed record must not leave half of the file's matches behind.
        let mut scratch = MatchLedger::new();
        rule.record(file, self.project_key, &mut scratch)?;
        ledger.merge(scratch);
        Ok(())
    }
}

fn report_failure(rule: &RuleIdentity, file: &SourceFile, error: &TextGuardError) {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    log::error!(
        "Rule {rule} failed on '{}', file skipped for this rule: {message}",
        file.absolute_path().display()
    );
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod tests;
