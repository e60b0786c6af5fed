use serde::Serialize;

use crate::checker::Issue;
use crate::error::Result;

use super::{OutputFormatter, ScanReport};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonOutput<'a> {
    summary: Summary,
    issues: Vec<JsonIssue<'a>>,
}

#[derive(Serialize)]
struct Summary {
    files: usize,
    rules: usize,
    issues: usize,
    failures: usize,
}

#[derive(Serialize)]
struct JsonIssue<'a> {
    path: String,
    line: usize,
    rule: &'a str,
    repository: &'a str,
    message: &'a str,
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let output = JsonOutput {
            summary: Summary {
                files: report.summary.files,
                rules: report.summary.checks,
                issues: report.issues.len(),
                failures: report.summary.failures,
            },
            issues: report.issues.iter().map(convert_issue).collect(),
        };

        Ok(serde_json::to_string_pretty(&output)?)
    }
}

fn convert_issue(issue: &Issue) -> JsonIssue<'_> {
    JsonIssue {
        path: issue.file.display_path(),
        line: issue.line,
        rule: &issue.rule.key,
        repository: &issue.rule.repository,
        message: &issue.message,
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
