use std::fmt::Write;

use crate::checker::build_checks;
use crate::cli::{Cli, RulesArgs};
use crate::config::Config;
use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS};

use super::context::{load_config, write_output};

#[must_use]
pub fn run_rules(args: &RulesArgs, cli: &Cli) -> i32 {
    match run_rules_impl(args, cli) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// List the configured rules after validating that every one compiles.
///
/// # Errors
/// Returns an error if the configuration is invalid or a rule fails to compile.
pub fn run_rules_impl(args: &RulesArgs, cli: &Cli) -> crate::Result<()> {
    let loaded = load_config(args.config.as_deref(), cli.no_config)?;
    build_checks(&loaded.config)?;

    if let Some(source) = &loaded.source {
        log::info!("Rules from {}", source.display());
    }
    write_output(None, &format_rules(&loaded.config))
}

#[must_use]
pub fn format_rules(config: &Config) -> String {
    if config.rules.is_empty() {
        return "No rules configured\n".to_string();
    }

    let key_width = config
        .rules
        .iter()
        .map(|rule| rule.key.len() + config.repository.len() + 1)
        .max()
        .unwrap_or(0);
    let kind_width = config
        .rules
        .iter()
        .map(|rule| rule.kind.name().len())
        .max()
        .unwrap_or(0);

    let mut output = String::new();
    for rule in &config.rules {
        let id = format!("{}:{}", config.repository, rule.key);
        let state = if rule.enabled { "enabled" } else { "disabled" };
        writeln!(
            output,
            "{id:<key_width$}  {:<kind_width$}  {state:<8}  {}",
            rule.kind.name(),
            rule.message_or_default()
        )
        .ok();
    }
    output
}

#[cfg(test)]
#[path = "rules_tests.rs"]
mod tests;
