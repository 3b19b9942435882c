use std::borrow::Cow;

use rustyline::{
    completion::Completer,
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Helper,
};

use crate::core::commands::CommandExecutor;
use crate::highlight::SyntaxHighlighter;

/// rustyline helper: colours the command word as it is typed.
#[derive(Clone)]
pub struct LineHelper {
    highlighter: SyntaxHighlighter,
    executor: CommandExecutor,
}

impl LineHelper {
    pub fn new(highlighter: SyntaxHighlighter, executor: CommandExecutor) -> Self {
        Self {
            highlighter,
            executor,
        }
    }
}

impl Helper for LineHelper {}

impl Highlighter for LineHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(
            self.highlighter
                .highlight_command(line, |word| self.executor.is_builtin(word)),
        )
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }
}

impl Hinter for LineHelper {
    type Hint = String;
}

impl Validator for LineHelper {}

impl Completer for LineHelper {
    type Candidate = String;
}
