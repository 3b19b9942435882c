mod vars;

pub use vars::EnvVarManager;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnvError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("Environment variable not found: {0}")]
    VarNotFound(String),
    #[error("Invalid value: {0}")]
    InvalidValue(&'static str),
}
