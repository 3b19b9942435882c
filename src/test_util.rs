//! Helpers for tests that touch process-wide state (working directory and
//! environment variables).

use std::env;
use std::path::PathBuf;
use std::sync::{Mutex, MutexGuard};

static PROCESS_STATE: Mutex<()> = Mutex::new(());

/// Serializes tests that read or change the working directory or environment.
pub(crate) fn lock() -> MutexGuard<'static, ()> {
    PROCESS_STATE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Restores the listed variables when dropped.
pub(crate) struct EnvSnapshot {
    vars: Vec<(String, Option<String>)>,
}

impl EnvSnapshot {
    pub(crate) fn take(names: &[&str]) -> Self {
        let vars = names
            .iter()
            .map(|name| (name.to_string(), env::var(name).ok()))
            .collect();
        Self { vars }
    }
}

impl Drop for EnvSnapshot {
    fn drop(&mut self) {
        for (name, value) in &self.vars {
            match value {
                Some(value) => env::set_var(name, value),
                None => env::remove_var(name),
            }
        }
    }
}

/// Restores the working directory when dropped.
pub(crate) struct CwdGuard {
    original: Option<PathBuf>,
}

impl CwdGuard {
    pub(crate) fn new() -> Self {
        Self {
            original: env::current_dir().ok(),
        }
    }
}

impl Drop for CwdGuard {
    fn drop(&mut self) {
        if let Some(original) = &self.original {
            let _ = env::set_current_dir(original);
        }
    }
}
