use std::path::PathBuf;

mod loader;
mod paths;

use super::env::{EnvError, EnvVarManager};
use crate::flags::Flags;
use loader::ConfigLoader;
pub use paths::ConfigPaths;
use thiserror::Error;

/// Startup configuration: which rc files to read, and where their settings go.
pub struct Config {
    paths: ConfigPaths,
    env_vars: EnvVarManager,
    required: bool,
}

impl Config {
    pub fn new() -> Result<Self, ConfigError> {
        Ok(Config {
            paths: ConfigPaths::new()?,
            env_vars: EnvVarManager::new(),
            required: false,
        })
    }

    /// Uses `--config` when given; that file must exist.
    pub fn from_flags(flags: &Flags) -> Result<Self, ConfigError> {
        match &flags.config {
            Some(path) => Ok(Config {
                paths: ConfigPaths::single(path),
                env_vars: EnvVarManager::new(),
                required: true,
            }),
            None => Self::new(),
        }
    }

    pub fn load(&self) -> Result<(), ConfigError> {
        let loader = ConfigLoader::new(&self.paths, &self.env_vars);
        loader.load_configs(self.required)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Config file not found: {}", .0.display())]
    ConfigFileNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {source}", path.display())]
    Env {
        path: PathBuf,
        line: usize,
        #[source]
        source: EnvError,
    },
}
