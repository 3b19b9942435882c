use thiserror::Error;

pub mod executor;
pub mod jobs;

pub use executor::{Launch, ProcessExecutor};
pub use jobs::{Job, JobRegistry, JobState};

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("no command to run")]
    EmptyCommand,
    #[error("invalid argument {0:?}: contains a NUL byte")]
    InvalidArgument(String),
    #[error("could not create process: {0}")]
    Spawn(#[source] std::io::Error),
    #[error("failed waiting for process {pid}: {source}")]
    Wait {
        pid: i32,
        #[source]
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
