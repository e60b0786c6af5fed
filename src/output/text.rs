use std::fmt::Write;

use crate::checker::Issue;
use crate::error::Result;

use super::{OutputFormatter, ScanReport};

/// Color output mode for terminal display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorMode {
    /// Use colors if stdout is a TTY and `NO_COLOR` is not set
    #[default]
    Auto,
    Always,
    Never,
}

mod ansi {
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const CYAN: &str = "\x1b[36m";
    pub const DIM: &str = "\x1b[2m";
    pub const RESET: &str = "\x1b[0m";
}

pub struct TextFormatter {
    use_colors: bool,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: Self::should_use_colors(mode),
        }
    }

    fn should_use_colors(mode: ColorMode) -> bool {
        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                if std::env::var_os("NO_COLOR").is_some() {
                    return false;
                }
                std::io::IsTerminal::is_terminal(&std::io::stdout())
            }
        }
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.use_colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }

    fn format_issue(&self, issue: &Issue, output: &mut String) {
        let location = format!("{}:{}", issue.file.display_path(), issue.line);
        let rule = format!("[{}]", issue.rule);
        writeln!(
            output,
            "{}: {} {}",
            self.paint(&location, ansi::CYAN),
            self.paint(&rule, ansi::DIM),
            issue.message
        )
        .ok();
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &ScanReport) -> Result<String> {
        let mut output = String::new();
        for issue in &report.issues {
            self.format_issue(issue, &mut output);
        }

        if !report.issues.is_empty() {
            output.push('\n');
        }

        let summary = &report.summary;
        let counts = format!(
            "{} issue{} in {} file{} ({} rule{})",
            summary.issues,
            plural(summary.issues),
            summary.files,
            plural(summary.files),
            summary.checks,
            plural(summary.checks)
        );
        let color = if summary.issues == 0 {
            ansi::GREEN
        } else {
            ansi::RED
        };
        writeln!(output, "Summary: {}", self.paint(&counts, color)).ok();
        if summary.failures > 0 {
            writeln!(
                output,
                "{} rule evaluation{} failed; see log output",
                summary.failures,
                plural(summary.failures)
            )
            .ok();
        }
        Ok(output)
    }
}

const fn plural(count: usize) -> &'static str {
    if count == 1 { "" } else { "s" }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
