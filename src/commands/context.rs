use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{Config, ConfigLoader, FileConfigLoader, LoadResult};

/// Load configuration from `config_path`, or by discovery when absent.
///
/// # Errors
/// Returns an error if the configuration cannot be read, parsed or validated.
pub(crate) fn load_config(config_path: Option<&Path>, no_config: bool) -> crate::Result<LoadResult> {
    if no_config {
        return Ok(LoadResult::builtin());
    }

    let loader = FileConfigLoader::new();
    config_path.map_or_else(|| loader.load(), |path| loader.load_from_path(path))
}

/// Project key precedence: command line, then configuration, then the name
/// of the first scanned directory.
pub(crate) fn resolve_project_key(
    cli_key: Option<&str>,
    config: &Config,
    paths: &[PathBuf],
) -> String {
    if let Some(key) = cli_key.or(config.project_key.as_deref()) {
        return key.to_string();
    }

    paths
        .iter()
        .find(|path| path.is_dir())
        .and_then(|dir| dunce::canonicalize(dir).ok())
        .and_then(|dir| dir.file_name().map(|name| name.to_string_lossy().into_owned()))
        .unwrap_or_default()
}

/// Write `content` to `output_path`, or to stdout when no path is given.
///
/// # Errors
/// Returns an error if the file or its parent directories cannot be written.
pub(crate) fn write_output(output_path: Option<&Path>, content: &str) -> crate::Result<()> {
    if let Some(path) = output_path {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
    } else {
        print!("{content}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;
