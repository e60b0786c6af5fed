use crate::checker::build_checks;
use crate::cli::{CheckArgs, Cli};
use crate::coordinator::ScanCoordinator;
use crate::output::{
    ColorMode, JsonFormatter, OutputFormat, OutputFormatter, RuleInfo, SarifFormatter, ScanReport,
    TextFormatter,
};
use crate::scanner::{DirectoryScanner, SuffixFilter};
use crate::{EXIT_CONFIG_ERROR, EXIT_ISSUES_FOUND, EXIT_SUCCESS};

use super::context::{load_config, resolve_project_key, write_output};

#[must_use]
pub fn run_check(args: &CheckArgs, cli: &Cli) -> i32 {
    match run_check_impl(args, cli) {
        Ok(exit_code) => exit_code,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Scan the requested paths and render the issues found.
///
/// # Errors
/// Returns an error if configuration, rule compilation, file enumeration or
/// writing the report fails. Failures of a single rule on a single file are
/// logged and do not end the scan.
pub fn run_check_impl(args: &CheckArgs, cli: &Cli) -> crate::Result<i32> {
    let config = load_config(args.config.as_deref(), cli.no_config)?.config;

    let suffixes = args
        .suffix
        .clone()
        .unwrap_or_else(|| config.scanner.suffixes.clone());
    let mut exclude_patterns = config.scanner.exclude.clone();
    exclude_patterns.extend(args.exclude.iter().cloned());
    let scanner = DirectoryScanner::new(SuffixFilter::new(&suffixes, &exclude_patterns)?);

    let checks = build_checks(&config)?;
    let files = scanner.collect_sources(&args.paths)?;
    let project_key = resolve_project_key(args.project_key.as_deref(), &config, &args.paths);

    let mut issues = Vec::new();
    let summary = ScanCoordinator::new(&checks, &project_key)
        .with_parallel(!args.sequential)
        .run(&files, &mut issues);
    let report = ScanReport::new(issues, summary, RuleInfo::from_config(&config));

    let output = format_output(args.format, &report, cli.color.into())?;
    write_output(args.output.as_deref(), &output)?;

    if report.has_issues() && !args.warn_only {
        Ok(EXIT_ISSUES_FOUND)
    } else {
        Ok(EXIT_SUCCESS)
    }
}

pub(crate) fn format_output(
    format: OutputFormat,
    report: &ScanReport,
    color_mode: ColorMode,
) -> crate::Result<String> {
    match format {
        OutputFormat::Text => TextFormatter::new(color_mode).format(report),
        OutputFormat::Json => JsonFormatter.format(report),
        OutputFormat::Sarif => SarifFormatter::new().format(report),
    }
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
