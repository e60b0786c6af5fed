use serde::{Deserialize, Serialize};

pub const DEFAULT_REPOSITORY: &str = "text";
pub const DEFAULT_SUFFIXES: &[&str] = &["properties", "txt"];

/// Top-level `.text-guard.toml` contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Matched by each rule's `skip_project_keys`. Overridden by `--project-key`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_key: Option<String>,

    #[serde(default = "default_repository")]
    pub repository: String,

    #[serde(default)]
    pub scanner: ScannerConfig,

    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_key: None,
            repository: default_repository(),
            scanner: ScannerConfig::default(),
            rules: Vec::new(),
        }
    }
}

impl Config {
    pub fn enabled_rules(&self) -> impl Iterator<Item = &RuleConfig> {
        self.rules.iter().filter(|rule| rule.enabled)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ScannerConfig {
    #[serde(default = "default_suffixes")]
    pub suffixes: Vec<String>,

    #[serde(default)]
    pub exclude: Vec<String>,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            suffixes: default_suffixes(),
            exclude: Vec::new(),
        }
    }
}

/// One configured rule instance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RuleConfig {
    pub key: String,

    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Regex matched against the project key; a match suppresses the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_project_keys: Option<String>,

    /// Regex matched against each file's base name; a match suppresses the rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skip_file_names: Option<String>,

    #[serde(flatten)]
    pub kind: RuleKind,
}

impl RuleConfig {
    /// The configured message, or a description derived from the rule kind.
    #[must_use]
    pub fn message_or_default(&self) -> String {
        self.message
            .clone()
            .unwrap_or_else(|| self.kind.default_message().to_string())
    }
}

/// Variant fields reject unknown keys, so a misspelled field in a rule
/// table (shared or kind-specific) fails to load.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "kebab-case", deny_unknown_fields)]
pub enum RuleKind {
    Simple {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_pattern: Option<String>,
    },
    Multiline {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_pattern: Option<String>,
    },
    RequiredString {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trigger_expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        must_exist_expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        file_pattern: Option<String>,
    },
    DisallowedIfMatchElsewhere {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trigger_expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trigger_file_pattern: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        disallow_expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        disallow_file_pattern: Option<String>,
        #[serde(default = "default_true")]
        line_by_line: bool,
    },
    BothMustExist {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trigger_expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        trigger_file_pattern: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        must_also_exist_expression: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        must_also_exist_file_pattern: Option<String>,
        #[serde(default = "default_true")]
        line_by_line: bool,
    },
}

impl RuleKind {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Simple { .. } => "simple",
            Self::Multiline { .. } => "multiline",
            Self::RequiredString { .. } => "required-string",
            Self::DisallowedIfMatchElsewhere { .. } => "disallowed-if-match-elsewhere",
            Self::BothMustExist { .. } => "both-must-exist",
        }
    }

    #[must_use]
    pub const fn is_cross_file(&self) -> bool {
        matches!(
            self,
            Self::DisallowedIfMatchElsewhere { .. } | Self::BothMustExist { .. }
        )
    }

    const fn default_message(&self) -> &'static str {
        match self {
            Self::Simple { .. } | Self::Multiline { .. } => "Text matched a disallowed pattern",
            Self::RequiredString { .. } => "Required text is missing from this file",
            Self::DisallowedIfMatchElsewhere { .. } => {
                "Text is disallowed when the trigger pattern appears in the project"
            }
            Self::BothMustExist { .. } => {
                "Companion text required by this line was not found in the project"
            }
        }
    }
}

fn default_repository() -> String {
    DEFAULT_REPOSITORY.to_string()
}

fn default_suffixes() -> Vec<String> {
    DEFAULT_SUFFIXES.iter().map(ToString::to_string).collect()
}

const fn default_true() -> bool {
    true
}

#[cfg(test)]
#[path = "model_tests.rs"]
mod tests;
