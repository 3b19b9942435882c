use super::{Command, CommandError, Outcome};
use crate::core::state::Session;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], _session: &mut Session) -> Result<Outcome, CommandError> {
        Ok(Outcome::Exit)
    }
}
