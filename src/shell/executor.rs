use std::io::{self, Write};

use log::debug;

use crate::core::commands::{CommandError, Outcome};
use crate::core::parser::CommandLine;
use crate::highlight::SyntaxHighlighter;

pub(crate) trait CommandHandler {
    fn execute_line(&mut self, line: &str) -> Outcome;
    fn report(&self, error: &CommandError);
}

impl CommandHandler for super::Shell {
    fn execute_line(&mut self, line: &str) -> Outcome {
        let command_line = CommandLine::parse(line);
        if command_line.is_empty() {
            return Outcome::Continue;
        }

        debug!("dispatching {} tokens: {:?}", command_line.len(), command_line);

        match self.executor.dispatch(&command_line, &mut self.session) {
            Ok(outcome) => outcome,
            Err(e) => {
                self.report(&e);
                Outcome::Continue
            }
        }
    }

    fn report(&self, error: &CommandError) {
        if let Some(message) = error_message(error, &self.error_highlighter, self.quiet) {
            // Nowhere left to report a failing stderr.
            let _ = writeln!(io::stderr(), "{}", message);
        }
    }
}

/// The diagnostic line for `error`, or `None` in quiet mode.
fn error_message(
    error: &CommandError,
    highlighter: &SyntaxHighlighter,
    quiet: bool,
) -> Option<String> {
    if quiet {
        return None;
    }
    Some(highlighter.highlight_error(&format!("nook: {}", error)))
}
