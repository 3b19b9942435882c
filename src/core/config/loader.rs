use std::fs;
use std::path::Path;

use log::{debug, warn};

use super::{ConfigError, ConfigPaths};
use crate::core::env::{EnvError, EnvVarManager};

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
    env_vars: &'a EnvVarManager,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths, env_vars: &'a EnvVarManager) -> Self {
        Self { paths, env_vars }
    }

    /// Reads every startup file in order. Missing files are skipped unless
    /// `required` is set.
    pub fn load_configs(&self, required: bool) -> Result<(), ConfigError> {
        for path in self.paths.files() {
            if path.exists() {
                self.source_file(path)?;
            } else if required {
                return Err(ConfigError::ConfigFileNotFound(path.clone()));
            } else {
                debug!("no startup file at {}", path.display());
            }
        }
        Ok(())
    }

    fn source_file(&self, path: &Path) -> Result<(), ConfigError> {
        debug!("reading startup file {}", path.display());
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        for (index, line) in content.lines().enumerate() {
            self.process_line(line).map_err(|source| ConfigError::Env {
                path: path.to_path_buf(),
                line: index + 1,
                source,
            })?;
        }
        Ok(())
    }

    fn process_line(&self, line: &str) -> Result<(), EnvError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match line {
            s if s.starts_with("export ") => self.process_env_var(&s["export ".len()..]),
            s if s.starts_with("PATH=") => self.process_env_var(s),
            s => {
                warn!("ignoring unsupported startup line: {}", s);
                Ok(())
            }
        }
    }

    fn process_env_var(&self, var_def: &str) -> Result<(), EnvError> {
        let Some((name, value)) = var_def.split_once('=') else {
            warn!("ignoring export without a value: {}", var_def);
            return Ok(());
        };

        let name = name.trim();
        let value = strip_quotes(value.trim());
        let expanded = self.env_vars.expand_value(value)?;
        debug!("{}={}", name, expanded);
        self.env_vars.set(name, &expanded)
    }
}

fn strip_quotes(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('"') && value.ends_with('"'))
            || (value.starts_with('\'') && value.ends_with('\'')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
