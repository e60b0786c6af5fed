mod json;
mod sarif;
mod text;

pub use json::JsonFormatter;
pub use sarif::SarifFormatter;
pub use text::{ColorMode, TextFormatter};

use crate::checker::{Issue, RuleIdentity};
use crate::config::Config;
use crate::coordinator::ScanSummary;
use crate::error::Result;

/// Description of a configured rule for report headers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo {
    pub identity: RuleIdentity,
    pub kind: &'static str,
    pub message: String,
}

impl RuleInfo {
    /// Every enabled rule in `config`, in declaration order.
    #[must_use]
    pub fn from_config(config: &Config) -> Vec<Self> {
        config
            .enabled_rules()
            .map(|rule| Self {
                identity: RuleIdentity::new(config.repository.as_str(), rule.key.as_str()),
                kind: rule.kind.name(),
                message: rule.message_or_default(),
            })
            .collect()
    }
}

/// Everything a formatter renders for one scan.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub issues: Vec<Issue>,
    pub summary: ScanSummary,
    pub rules: Vec<RuleInfo>,
}

impl ScanReport {
    /// Issues are sorted by path, line and rule so output is stable across
    /// parallel runs.
    #[must_use]
    pub fn new(mut issues: Vec<Issue>, summary: ScanSummary, rules: Vec<RuleInfo>) -> Self {
        issues.sort_by(|a, b| {
            a.file
                .display_path()
                .cmp(&b.file.display_path())
                .then(a.line.cmp(&b.line))
                .then_with(|| a.rule.cmp(&b.rule))
        });
        Self {
            issues,
            summary,
            rules,
        }
    }

    #[must_use]
    pub fn has_issues(&self) -> bool {
        !self.issues.is_empty()
    }
}

/// Renders a scan report.
pub trait OutputFormatter {
    /// # Errors
    /// Returns an error if the formatting fails.
    fn format(&self, report: &ScanReport) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    Sarif,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "sarif" => Ok(Self::Sarif),
            _ => Err(format!("Unknown output format: {s}")),
        }
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
