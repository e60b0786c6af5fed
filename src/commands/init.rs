use std::fs;

use crate::{EXIT_CONFIG_ERROR, EXIT_SUCCESS, Result, TextGuardError};

#[must_use]
pub fn run_init(args: &crate::cli::InitArgs) -> i32 {
    match run_init_impl(args) {
        Ok(()) => EXIT_SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            EXIT_CONFIG_ERROR
        }
    }
}

/// Write a starter configuration file.
///
/// # Errors
/// Returns an error if the file already exists (without --force) or cannot be written.
pub fn run_init_impl(args: &crate::cli::InitArgs) -> Result<()> {
    let output_path = &args.output;

    if output_path.exists() && !args.force {
        return Err(TextGuardError::Config(format!(
            "Configuration file already exists: {}. Use --force to overwrite.",
            output_path.display()
        )));
    }

    fs::write(output_path, generate_config_template())?;

    println!("Created configuration file: {}", output_path.display());
    Ok(())
}

#[must_use]
pub fn generate_config_template() -> String {
    r#"# text-guard configuration file

# Project key matched by each rule's `skip_project_keys`.
# Defaults to the name of the scanned directory; --project-key overrides it.
# project_key = "com.mycorp.projectA:service"

# Repository name shown in front of every rule key (default: "text")
repository = "text"

[scanner]
# File suffixes to scan when walking directories (default: properties, txt).
# Files named explicitly on the command line are always scanned.
suffixes = ["properties", "txt"]

# Glob patterns to skip entirely
exclude = ["**/target/**", "**/.git/**"]

# Every rule needs a unique `key` and a `kind`:
#   simple                         regex per line, one issue per matching line
#   multiline                      regex over the whole file (. matches newlines), first match only
#   required-string                trigger present but must-exist absent in the same file
#   disallowed-if-match-elsewhere  report every disallowed match in the project
#   both-must-exist                trigger lines need the companion text somewhere in the project
#
# Common optional fields: message, file_pattern (Ant style, e.g. "**/*.properties"),
# skip_project_keys and skip_file_names (regexes that suppress the rule), enabled.

[[rules]]
key = "no-plaintext-password"
kind = "simple"
expression = "(?i)password\\s*=\\s*\\S+"
file_pattern = "**/*.properties"
message = "Plain text password"

# [[rules]]
# key = "java8-needs-foo-property"
# kind = "both-must-exist"
# trigger_expression = "<target>1\\.8</target>"
# trigger_file_pattern = "**/pom.xml"
# must_also_exist_expression = "-DFooProperty"
# must_also_exist_file_pattern = "**/setup-env.properties"
# message = "Building for Java 8 requires -DFooProperty in setup-env.properties"

# [[rules]]
# key = "no-jdk7-with-java8"
# kind = "disallowed-if-match-elsewhere"
# trigger_expression = "<target>1\\.8</target>"
# trigger_file_pattern = "**/pom.xml"
# disallow_expression = "JAVA_HOME=.*jdk1\\.7.*"
# disallow_file_pattern = "**/*.properties"
# line_by_line = true
"#
    .to_string()
}

#[cfg(test)]
#[path = "init_tests.rs"]
mod tests;
