use crate::core::commands::CommandError;
use crate::core::config::ConfigError;
use crate::core::env::EnvError;
use crate::process::ProcessError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Command(#[from] CommandError),
    #[error("Process error: {0}")]
    Process(#[from] ProcessError),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),
}
