use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::output::{ColorMode, OutputFormat};

/// Color output control
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum ColorChoice {
    /// Auto-detect terminal capability
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorChoice> for ColorMode {
    fn from(choice: ColorChoice) -> Self {
        match choice {
            ColorChoice::Auto => Self::Auto,
            ColorChoice::Always => Self::Always,
            ColorChoice::Never => Self::Never,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "text-guard")]
#[command(author, version, about = "Regex rules for configuration and text files, within and across files")]
#[command(long_about = "Scan text files with configured regular-expression rules and report \
    line-level issues. Cross-file rules can make one file's content depend on another's.\n\n\
    Exit codes:\n  \
    0 - No issues found\n  \
    1 - Issues found\n  \
    2 - Configuration or runtime error")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Control color output
    #[arg(long, value_enum, default_value = "auto", global = true)]
    pub color: ColorChoice,

    /// Skip loading configuration file
    #[arg(long, global = true)]
    pub no_config: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter implied by `--quiet` and `-v`, used when `RUST_LOG` is unset.
    #[must_use]
    pub const fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan files with the configured rules
    Check(CheckArgs),

    /// Generate a starter configuration file
    Init(InitArgs),

    /// List the configured rules
    Rules(RulesArgs),
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Paths to scan (files or directories)
    #[arg(default_value = ".")]
    pub paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Project key matched by each rule's `skip_project_keys` (overrides config)
    #[arg(long)]
    pub project_key: Option<String>,

    /// File suffixes to scan (comma-separated, e.g. properties,txt; overrides config)
    #[arg(long, value_delimiter = ',')]
    pub suffix: Option<Vec<String>>,

    /// Exclude patterns (glob syntax, can be specified multiple times)
    #[arg(long, short = 'x')]
    pub exclude: Vec<String>,

    /// Output format [possible values: text, json, sarif]
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,

    /// Write output to file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report issues but exit with 0
    #[arg(long)]
    pub warn_only: bool,

    /// Scan files one at a time instead of in parallel
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Parser, Debug)]
pub struct InitArgs {
    /// Output path for configuration file
    #[arg(short, long, default_value = ".text-guard.toml")]
    pub output: PathBuf,

    /// Overwrite existing configuration
    #[arg(long)]
    pub force: bool,
}

#[derive(Parser, Debug)]
pub struct RulesArgs {
    /// Path to configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
