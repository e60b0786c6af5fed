use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TextGuardError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid glob pattern: {pattern}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Invalid regular expression for rule '{rule}': {pattern}")]
    InvalidRegex {
        rule: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("JSON serialization error: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}

impl TextGuardError {
    /// Short machine-friendly name of the error category.
    #[must_use]
    pub const fn error_type(&self) -> &'static str {
        match self {
            Self::Config(_) => "Config",
            Self::FileRead { .. } => "FileRead",
            Self::InvalidPattern { .. } => "InvalidPattern",
            Self::InvalidRegex { .. } => "InvalidRegex",
            Self::Io(_) => "Io",
            Self::TomlParse(_) => "TomlParse",
            Self::TomlSerialize(_) => "TomlSerialize",
            Self::JsonSerialize(_) => "JsonSerialize",
        }
    }

    /// Build a `FileRead` error for `path`.
    #[must_use]
    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, TextGuardError>;

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
