//! Turns rule configuration into compiled checks before a scan starts.

use crate::config::{Config, RuleConfig, RuleKind};
use crate::error::Result;

use super::cross_file::{BothMustExist, DisallowedIfMatchElsewhere};
use super::issue::RuleIdentity;
use super::path_filter::Exclusions;
use super::single::{MultilineTextMatch, RequiredStringNotPresent, SimpleTextMatch};
use super::{Check, RuleSettings};

/// Compile every enabled rule in `config`, in declaration order.
///
/// # Errors
/// Returns an error naming the rule if any expression, exclusion regex or
/// file pattern fails to compile.
pub fn build_checks(config: &Config) -> Result<Vec<Check>> {
    config
        .enabled_rules()
        .map(|rule| build_check(&config.repository, rule))
        .collect()
}

fn build_check(repository: &str, rule: &RuleConfig) -> Result<Check> {
    let settings = RuleSettings::new(
        RuleIdentity::new(repository, rule.key.as_str()),
        rule.message_or_default(),
    )
    .with_exclusions(Exclusions::new(
        &rule.key,
        rule.skip_project_keys.as_deref(),
        rule.skip_file_names.as_deref(),
    )?);

    let check = match &rule.kind {
        RuleKind::Simple {
            expression,
            file_pattern,
        } => Check::Single(Box::new(SimpleTextMatch::new(
            settings,
            expression.as_deref(),
            file_pattern.as_deref(),
        )?)),
        RuleKind::Multiline {
            expression,
            file_pattern,
        } => Check::Single(Box::new(MultilineTextMatch::new(
            settings,
            expression.as_deref(),
            file_pattern.as_deref(),
        )?)),
        RuleKind::RequiredString {
            trigger_expression,
            must_exist_expression,
            file_pattern,
        } => Check::Single(Box::new(RequiredStringNotPresent::new(
            settings,
            trigger_expression.as_deref(),
            must_exist_expression.as_deref(),
            file_pattern.as_deref(),
        )?)),
        RuleKind::DisallowedIfMatchElsewhere {
            trigger_expression,
            trigger_file_pattern,
            disallow_expression,
            disallow_file_pattern,
            line_by_line,
        } => Check::CrossFile(Box::new(DisallowedIfMatchElsewhere::new(
            settings,
            (trigger_expression.as_deref(), trigger_file_pattern.as_deref()),
            (disallow_expression.as_deref(), disallow_file_pattern.as_deref()),
            *line_by_line,
        )?)),
        RuleKind::BothMustExist {
            trigger_expression,
            trigger_file_pattern,
            must_also_exist_expression,
            must_also_exist_file_pattern,
            line_by_line,
        } => Check::CrossFile(Box::new(BothMustExist::new(
            settings,
            (trigger_expression.as_deref(), trigger_file_pattern.as_deref()),
            (
                must_also_exist_expression.as_deref(),
                must_also_exist_file_pattern.as_deref(),
            ),
            *line_by_line,
        )?)),
    };
    Ok(check)
}

#[cfg(test)]
#[path = "builder_tests.rs"]
mod tests;
