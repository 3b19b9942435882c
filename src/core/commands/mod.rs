use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

mod cd;
mod exit;

pub use cd::{parent_of, CdCommand, PathClass};
pub use exit::ExitCommand;

use crate::core::env::EnvError;
use crate::core::parser::CommandLine;
use crate::core::state::Session;
use crate::process::{Launch, ProcessError, ProcessExecutor};

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("empty command line")]
    EmptyCommand,
    #[error("cd: no previous directory")]
    NoPreviousDirectory,
    #[error("cd: HOME not set")]
    HomeNotSet,
    #[error("cd: current directory is unavailable")]
    CurrentDirUnavailable,
    #[error("cd: {path}: {source}")]
    Directory {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error("environment error: {0}")]
    Env(#[from] EnvError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// What the main loop should do after a line has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

pub trait Command {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Outcome, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Cd(CdCommand),
    Exit(ExitCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Outcome, CommandError> {
        match self {
            CommandType::Cd(cmd) => cmd.execute(args, session),
            CommandType::Exit(cmd) => cmd.execute(args, session),
        }
    }
}

/// Routes a tokenized line to a built-in or to the process launcher.
#[derive(Clone)]
pub struct CommandExecutor {
    commands: BTreeMap<&'static str, CommandType>,
    process_executor: ProcessExecutor,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandExecutor {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));

        Self {
            commands,
            process_executor: ProcessExecutor::new(),
        }
    }

    pub fn dispatch(&self, line: &CommandLine, session: &mut Session) -> Result<Outcome, CommandError> {
        let program = line.program().ok_or(CommandError::EmptyCommand)?;

        if let Some(cmd) = self.commands.get(program) {
            if line.is_detached() {
                debug!("{}: built-in runs in the foreground, ignoring &", program);
            }
            return cmd.execute(&line.args()[1..], session);
        }

        let launch = self
            .process_executor
            .launch(line.args(), line.is_detached(), &mut session.jobs)?;
        match launch {
            Launch::Waited { code, .. } => {
                debug!("{} ({}) finished: {:?}", program, launch.pid(), code)
            }
            Launch::Detached { .. } => debug!("{} ({}) detached", program, launch.pid()),
        }
        Ok(Outcome::Continue)
    }

    pub fn is_builtin(&self, command: &str) -> bool {
        self.commands.contains_key(command)
    }
}
