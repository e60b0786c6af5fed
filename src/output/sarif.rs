use serde::Serialize;

use crate::checker::Issue;
use crate::error::Result;

use super::{OutputFormatter, RuleInfo, ScanReport};

/// SARIF 2.1.0 output formatter for GitHub Code Scanning and other CI/CD tools.
#[derive(Debug, Default)]
pub struct SarifFormatter;

const SARIF_SCHEMA: &str = "https://raw.githubusercontent.com/oasis-tcs/sarif-spec/master/Schemata/sarif-schema-2.1.0.json";
const SARIF_VERSION: &str = "2.1.0";
const TOOL_NAME: &str = "text-guard";
const TOOL_VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Serialize)]
struct SarifLog<'a> {
    #[serde(rename = "$schema")]
    schema: &'static str,
    version: &'static str,
    runs: Vec<Run<'a>>,
}

#[derive(Serialize)]
struct Run<'a> {
    tool: Tool<'a>,
    results: Vec<SarifResult<'a>>,
}

#[derive(Serialize)]
struct Tool<'a> {
    driver: ToolDriver<'a>,
}

#[derive(Serialize)]
struct ToolDriver<'a> {
    name: &'static str,
    version: &'static str,
    rules: Vec<ReportingDescriptor<'a>>,
}

#[derive(Serialize)]
struct ReportingDescriptor<'a> {
    id: String,
    name: &'a str,
    #[serde(rename = "shortDescription")]
    short_description: MultiformatMessageString<'a>,
    #[serde(rename = "defaultConfiguration")]
    default_configuration: ReportingConfiguration,
    properties: RuleProperties,
}

#[derive(Serialize)]
struct RuleProperties {
    kind: &'static str,
}

#[derive(Serialize)]
struct ReportingConfiguration {
    level: &'static str,
}

#[derive(Serialize)]
struct MultiformatMessageString<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct SarifResult<'a> {
    #[serde(rename = "ruleId")]
    rule_id: String,
    #[serde(rename = "ruleIndex", skip_serializing_if = "Option::is_none")]
    rule_index: Option<usize>,
    level: &'static str,
    message: MultiformatMessageString<'a>,
    locations: Vec<Location>,
}

#[derive(Serialize)]
struct Location {
    #[serde(rename = "physicalLocation")]
    physical_location: PhysicalLocation,
}

#[derive(Serialize)]
struct PhysicalLocation {
    #[serde(rename = "artifactLocation")]
    artifact_location: ArtifactLocation,
    region: Region,
}

#[derive(Serialize)]
struct ArtifactLocation {
    uri: String,
    #[serde(rename = "uriBaseId")]
    uri_base_id: &'static str,
}

#[derive(Serialize)]
struct Region {
    #[serde(rename = "startLine")]
    start_line: usize,
}

impl SarifFormatter {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build_rule(rule: &RuleInfo) -> ReportingDescriptor<'_> {
        ReportingDescriptor {
            id: rule.identity.to_string(),
            name: &rule.identity.key,
            short_description: MultiformatMessageString {
                text: &rule.message,
            },
            default_configuration: ReportingConfiguration { level: "warning" },
            properties: RuleProperties { kind: rule.kind },
        }
    }

    fn convert_issue<'a>(issue: &'a Issue, rules: &[RuleInfo]) -> SarifResult<'a> {
        SarifResult {
            rule_id: issue.rule.to_string(),
            rule_index: rules.iter().position(|rule| rule.identity == issue.rule),
            level: "warning",
            message: MultiformatMessageString {
                text: &issue.message,
            },
            locations: vec![Location {
                physical_location: PhysicalLocation {
                    artifact_location: ArtifactLocation {
                        uri: issue.file.display_path(),
                        uri_base_id: "%SRCROOT%",
                    },
                    region: Region {
                        start_line: issue.line,
                    },
                },
            }],
        }
    }
}

impl OutputFormatter for SarifFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let log = SarifLog {
            schema: SARIF_SCHEMA,
            version: SARIF_VERSION,
            runs: vec![Run {
                tool: Tool {
                    driver: ToolDriver {
                        name: TOOL_NAME,
                        version: TOOL_VERSION,
                        rules: report.rules.iter().map(Self::build_rule).collect(),
                    },
                },
                results: report
                    .issues
                    .iter()
                    .map(|issue| Self::convert_issue(issue, &report.rules))
                    .collect(),
            }],
        };

        Ok(serde_json::to_string_pretty(&log)?)
    }
}

#[cfg(test)]
#[path = "sarif_tests.rs"]
mod tests;
