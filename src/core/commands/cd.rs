use super::{Command, CommandError, Outcome};
use crate::core::env::{EnvError, EnvVarManager};
use crate::core::state::{DirectoryState, Session};
use log::debug;
use std::env;

/// Shape of a `cd` argument, decided from its leading characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathClass<'a> {
    /// No argument or `-`: swap with the previous directory.
    Previous,
    /// `~` or `~/rest`; holds the part after the tilde.
    Home(&'a str),
    /// `..`
    Parent,
    /// Starts with `/`.
    Absolute(&'a str),
    /// `.` or `./rest`; holds the part after the dot.
    RelativeDot(&'a str),
    /// Anything else, resolved by the OS against the working directory.
    Bare(&'a str),
}

impl<'a> PathClass<'a> {
    pub fn classify(arg: Option<&'a str>) -> Self {
        match arg {
            None | Some("-") => PathClass::Previous,
            Some("..") => PathClass::Parent,
            Some(arg) if arg == "~" || arg.starts_with("~/") => PathClass::Home(&arg[1..]),
            Some(arg) if arg.starts_with('/') => PathClass::Absolute(arg),
            Some(arg) if arg == "." || arg.starts_with("./") => PathClass::RelativeDot(&arg[1..]),
            Some(arg) => PathClass::Bare(arg),
        }
    }
}

#[derive(Clone, Default)]
pub struct CdCommand {
    env: EnvVarManager,
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            env: EnvVarManager::new(),
        }
    }

    /// Changes the working directory according to `arg` and exports `PWD`.
    /// Returns the directory state to keep; on failure nothing has changed.
    pub fn change_directory(
        &self,
        arg: Option<&str>,
        state: &DirectoryState,
    ) -> Result<DirectoryState, CommandError> {
        let current = self.current_dir();
        let class = PathClass::classify(arg);
        let target = self.resolve(class, current.as_deref(), state)?;
        debug!("cd {:?} -> {}", class, target);

        env::set_current_dir(&target).map_err(|source| CommandError::Directory {
            path: target.clone(),
            source,
        })?;

        // The OS answer already has `.`, `..`, `//` and symlinks resolved.
        self.env.export_pwd(&env::current_dir()?)?;

        Ok(match current {
            Some(current) => DirectoryState::with_previous(current),
            None => state.clone(),
        })
    }

    /// The working directory as the OS reports it, or the last exported `PWD`
    /// when the directory has been removed underneath us.
    fn current_dir(&self) -> Option<String> {
        match env::current_dir() {
            Ok(dir) => Some(dir.to_string_lossy().into_owned()),
            Err(e) => {
                debug!("cd: current directory unavailable ({}), using PWD", e);
                self.env.get("PWD").ok().filter(|pwd| !pwd.is_empty())
            }
        }
    }

    fn resolve(
        &self,
        class: PathClass<'_>,
        current: Option<&str>,
        state: &DirectoryState,
    ) -> Result<String, CommandError> {
        let target = match class {
            PathClass::Previous => state
                .previous()
                .ok_or(CommandError::NoPreviousDirectory)?
                .to_string(),
            PathClass::Home(rest) => {
                let home = self.env.home().map_err(|e| match e {
                    EnvError::HomeDirNotFound => CommandError::HomeNotSet,
                    other => other.into(),
                })?;
                format!("{}{}", home, rest)
            }
            PathClass::Parent => {
                parent_of(current.ok_or(CommandError::CurrentDirUnavailable)?).to_string()
            }
            PathClass::Absolute(path) => path.to_string(),
            PathClass::RelativeDot(rest) => {
                format!("{}{}", current.ok_or(CommandError::CurrentDirUnavailable)?, rest)
            }
            PathClass::Bare(name) => name.to_string(),
        };
        Ok(target)
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], session: &mut Session) -> Result<Outcome, CommandError> {
        if args.len() > 1 {
            debug!("cd: ignoring extra arguments {:?}", &args[1..]);
        }
        session.dirs = self.change_directory(args.first().map(String::as_str), &session.dirs)?;
        Ok(Outcome::Continue)
    }
}

/// Cuts `path` at its last separator. When that separator is also the first
/// one the separator itself is kept, so the parent of `/a` is `/`.
pub fn parent_of(path: &str) -> &str {
    match (path.find('/'), path.rfind('/')) {
        (Some(first), Some(last)) if first == last => &path[..=last],
        (_, Some(last)) => &path[..last],
        _ => path,
    }
}
