use std::env;

use log::{debug, warn};
use rustyline::{config::Configurer, error::ReadlineError, history::DefaultHistory, Editor};

mod executor;

use crate::{
    core::{
        commands::{CommandExecutor, Outcome},
        config::Config,
        env::EnvVarManager,
        state::Session,
    },
    error::ShellError,
    flags::Flags,
    highlight::SyntaxHighlighter,
    input::LineHelper,
};

use executor::CommandHandler;

/// Printed before every line is read.
pub const PROMPT: &str = "% ";

pub struct Shell {
    pub(crate) editor: Editor<LineHelper, DefaultHistory>,
    pub(crate) executor: CommandExecutor,
    pub(crate) session: Session,
    pub(crate) error_highlighter: SyntaxHighlighter,
    pub(crate) quiet: bool,
}

impl Shell {
    pub fn new(flags: &Flags) -> Result<Self, ShellError> {
        load_startup_files(flags)?;

        let executor = CommandExecutor::new();
        let mut editor = Editor::<LineHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(LineHelper::new(
            SyntaxHighlighter::new(),
            executor.clone(),
        )));
        editor.set_auto_add_history(true);

        let current_dir = env::current_dir()?;
        EnvVarManager::new().export_pwd(&current_dir)?;

        Ok(Shell {
            editor,
            executor,
            session: Session::new(),
            error_highlighter: SyntaxHighlighter::for_stderr(),
            quiet: flags.quiet,
        })
    }

    /// Reads and runs lines until `exit` or end of input.
    pub fn run(&mut self) -> Result<(), ShellError> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if self.execute_line(&line) == Outcome::Exit {
                        debug!("exit requested");
                        return Ok(());
                    }
                }
                Err(ReadlineError::Interrupted) => continue,
                Err(ReadlineError::Eof) => {
                    debug!("end of input");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }
        }
    }
}

/// Runs the startup files. Problems with the default files are only warned
/// about; an explicit `--config` file must load cleanly.
fn load_startup_files(flags: &Flags) -> Result<(), ShellError> {
    let result = Config::from_flags(flags).and_then(|config| config.load());
    match result {
        Ok(()) => Ok(()),
        Err(e) if flags.config.is_some() => Err(e.into()),
        Err(e) => {
            warn!("skipping startup files: {}", e);
            Ok(())
        }
    }
}
