use std::path::{Path, PathBuf};

use crate::error::{Result, TextGuardError};

use super::Config;
use super::filesystem::{FileSystem, RealFileSystem};
use super::validation::validate_config;

pub const LOCAL_CONFIG_NAME: &str = ".text-guard.toml";
const USER_CONFIG_NAME: &str = "config.toml";

/// A loaded configuration and the file it came from, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadResult {
    pub config: Config,
    pub source: Option<PathBuf>,
}

impl LoadResult {
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            config: Config::default(),
            source: None,
        }
    }
}

pub trait ConfigLoader {
    /// Load configuration from the default locations.
    ///
    /// # Errors
    /// Returns an error if a discovered config file cannot be read, parsed or
    /// validated.
    fn load(&self) -> Result<LoadResult>;

    /// Load configuration from a specific path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed or validated.
    fn load_from_path(&self, path: &Path) -> Result<LoadResult>;
}

/// Loads configuration from the filesystem.
///
/// Search order:
/// 1. `.text-guard.toml` in the current directory
/// 2. `config.toml` in the platform user config directory
/// 3. `Config::default()` if neither exists
#[derive(Debug, Default)]
pub struct FileConfigLoader<F: FileSystem = RealFileSystem> {
    fs: F,
}

impl FileConfigLoader<RealFileSystem> {
    #[must_use]
    pub const fn new() -> Self {
        Self { fs: RealFileSystem }
    }
}

impl<F: FileSystem> FileConfigLoader<F> {
    #[must_use]
    pub const fn with_fs(fs: F) -> Self {
        Self { fs }
    }

    fn local_config_path(&self) -> Option<PathBuf> {
        self.fs
            .current_dir()
            .ok()
            .map(|dir| dir.join(LOCAL_CONFIG_NAME))
    }

    fn user_config_path(&self) -> Option<PathBuf> {
        self.fs.config_dir().map(|dir| dir.join(USER_CONFIG_NAME))
    }

    /// Parse and validate configuration text.
    ///
    /// # Errors
    /// Returns an error if the TOML is malformed or the configuration is invalid.
    pub fn parse_config(content: &str) -> Result<Config> {
        let config: Config = toml::from_str(content)?;
        validate_config(&config)?;
        Ok(config)
    }
}

impl<F: FileSystem> ConfigLoader for FileConfigLoader<F> {
    fn load(&self) -> Result<LoadResult> {
        if let Some(local_path) = self.local_config_path()
            && self.fs.exists(&local_path)
        {
            return self.load_from_path(&local_path);
        }

        if let Some(user_path) = self.user_config_path()
            && self.fs.exists(&user_path)
        {
            return self.load_from_path(&user_path);
        }

        log::debug!("No configuration file found, using built-in defaults");
        Ok(LoadResult::builtin())
    }

    fn load_from_path(&self, path: &Path) -> Result<LoadResult> {
        let content = self
            .fs
            .read_to_string(path)
            .map_err(|source| TextGuardError::file_read(path, source))?;
        let config = Self::parse_config(&content).map_err(|e| match e {
            TextGuardError::TomlParse(parse) => {
                TextGuardError::Config(format!("{}: {parse}", path.display()))
            }
            other => other,
        })?;

        log::info!(
            "Loaded configuration from {} ({} rules)",
            path.display(),
            config.rules.len()
        );
        Ok(LoadResult {
            config,
            source: Some(path.to_path_buf()),
        })
    }
}

#[cfg(test)]
#[path = "loader_tests/mod.rs"]
mod tests;
