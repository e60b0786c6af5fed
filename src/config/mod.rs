mod filesystem;
mod loader;
mod model;
mod validation;

pub use filesystem::{FileSystem, RealFileSystem};
pub use loader::{ConfigLoader, FileConfigLoader, LOCAL_CONFIG_NAME, LoadResult};
pub use model::{
    Config, DEFAULT_REPOSITORY, DEFAULT_SUFFIXES, RuleConfig, RuleKind, ScannerConfig,
};
pub use validation::validate_config;
