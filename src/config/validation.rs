//! Structural checks on a parsed configuration.
//!
//! Expressions and path patterns are compiled when checks are built, so
//! their errors surface there with the offending rule attached.

use indexmap::IndexSet;

use crate::config::Config;
use crate::{Result, TextGuardError};

/// # Errors
/// Returns an error if the repository name is blank, a rule key is blank
/// or repeated, or a scanner exclude pattern is not a valid glob.
pub fn validate_config(config: &Config) -> Result<()> {
    if config.repository.trim().is_empty() {
        return Err(TextGuardError::Config(
            "repository must not be empty".to_string(),
        ));
    }

    let mut seen = IndexSet::new();
    for (i, rule) in config.rules.iter().enumerate() {
        if rule.key.trim().is_empty() {
            return Err(TextGuardError::Config(format!(
                "rules[{i}].key must not be empty"
            )));
        }
        if !seen.insert(rule.key.as_str()) {
            return Err(TextGuardError::Config(format!(
                "duplicate rule key '{}' at rules[{i}]",
                rule.key
            )));
        }
    }

    for pattern in &config.scanner.exclude {
        globset::Glob::new(pattern).map_err(|source| TextGuardError::InvalidPattern {
            pattern: pattern.clone(),
            source,
        })?;
    }
    Ok(())
}

#[cfg(test)]
#[path = "validation_tests.rs"]
mod tests;
