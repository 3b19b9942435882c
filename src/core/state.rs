use crate::process::JobRegistry;

/// Directory memory carried between lines. The working directory itself
/// lives in the OS; only the previous one is remembered here.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryState {
    previous: Option<String>,
}

impl DirectoryState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_previous(previous: impl Into<String>) -> Self {
        Self {
            previous: Some(previous.into()),
        }
    }

    pub fn previous(&self) -> Option<&str> {
        self.previous.as_deref()
    }
}

/// Everything the main loop owns across iterations.
#[derive(Debug, Default)]
pub struct Session {
    pub dirs: DirectoryState,
    pub jobs: JobRegistry,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }
}
