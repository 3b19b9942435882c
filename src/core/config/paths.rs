use super::ConfigError;
use std::env;
use std::path::PathBuf;

/// Startup files, read in order.
#[derive(Debug, Clone)]
pub struct ConfigPaths {
    files: Vec<PathBuf>,
}

impl ConfigPaths {
    /// `~/.nook_profile` followed by `~/.nookrc`.
    pub fn new() -> Result<Self, ConfigError> {
        let home = env::var("HOME")
            .ok()
            .filter(|home| !home.is_empty())
            .map(PathBuf::from)
            .or_else(dirs::home_dir)
            .ok_or(ConfigError::HomeDirNotFound)?;

        Ok(ConfigPaths {
            files: vec![home.join(".nook_profile"), home.join(".nookrc")],
        })
    }

    /// A single explicitly chosen startup file.
    pub fn single(path: impl Into<PathBuf>) -> Self {
        ConfigPaths {
            files: vec![path.into()],
        }
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }
}
