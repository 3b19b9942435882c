use super::EnvError;
use log::debug;
use std::borrow::Cow;
use std::collections::HashSet;
use std::env;
use std::path::Path;

/// Thin layer over the process environment. Everything set here is exported
/// to children launched afterwards.
#[derive(Clone, Debug, Default)]
pub struct EnvVarManager;

impl EnvVarManager {
    pub fn new() -> Self {
        Self
    }

    pub fn set(&self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::InvalidValue("Empty variable name"));
        }
        if name.contains('=') || name.contains('\0') || value.contains('\0') {
            return Err(EnvError::InvalidValue("Variable contains '=' or NUL"));
        }

        let clean_value = if name == "PATH" {
            sanitize_path(value)?
        } else {
            value.to_string()
        };

        env::set_var(name, clean_value);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Result<String, EnvError> {
        env::var(name).map_err(|_| EnvError::VarNotFound(name.to_string()))
    }

    /// `HOME`, falling back to the platform's notion of the home directory.
    pub fn home(&self) -> Result<String, EnvError> {
        match env::var("HOME") {
            Ok(home) if !home.is_empty() => Ok(home),
            _ => dirs::home_dir()
                .map(|home| home.to_string_lossy().into_owned())
                .ok_or(EnvError::HomeDirNotFound),
        }
    }

    pub fn export_pwd(&self, path: &Path) -> Result<(), EnvError> {
        let path = path.to_string_lossy();
        debug!("PWD={}", path);
        self.set("PWD", &path)
    }

    pub fn expand_value<'a>(&self, value: &'a str) -> Result<Cow<'a, str>, EnvError> {
        if value.is_empty() {
            return Ok(Cow::Borrowed(value));
        }

        let mut modified = false;
        let mut result = value.to_string();

        if value.contains("$HOME") {
            let home = self.home()?;
            result = result.replace("$HOME", &home);
            modified = true;
        }

        if value.contains("$PATH") {
            let path = self.get("PATH").unwrap_or_default();
            result = result.replace("$PATH", &path);
            modified = true;
        }

        Ok(if modified {
            Cow::Owned(result)
        } else {
            Cow::Borrowed(value)
        })
    }
}

fn sanitize_path(path: &str) -> Result<String, EnvError> {
    if path.is_empty() {
        return Err(EnvError::InvalidValue("Empty PATH value"));
    }

    let mut seen = HashSet::new();
    let unique_parts: Vec<&str> = path
        .split([':', '"', '\''])
        .filter(|part| !part.is_empty())
        .filter(|part| seen.insert(*part))
        .collect();

    Ok(unique_parts.join(":"))
}
