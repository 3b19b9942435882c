use std::convert::Infallible;
use std::ffi::{c_char, CString};
use std::io::{self, Write};
use std::ptr;

use log::debug;

use super::{JobRegistry, ProcessError};

/// Exit status of a child whose program could not be found.
pub const EXIT_NOT_FOUND: i32 = 127;
/// Exit status of a child whose program was found but could not be executed.
pub const EXIT_CANNOT_EXECUTE: i32 = 126;

/// What the parent observed after creating a child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Launch {
    /// The child ran in the foreground and has exited. `code` is `None` when it
    /// was terminated by a signal.
    Waited { pid: i32, code: Option<i32> },
    /// The child was left running; its id was announced as `Job <pid>`.
    Detached { pid: i32 },
}

impl Launch {
    pub fn pid(&self) -> i32 {
        match *self {
            Launch::Waited { pid, .. } | Launch::Detached { pid } => pid,
        }
    }
}

/// Null-terminated argument vector, built before the fork so the child never
/// allocates.
struct Argv {
    _owned: Vec<CString>,
    ptrs: Vec<*const c_char>,
}

impl Argv {
    fn new(args: &[String]) -> Result<Self, ProcessError> {
        if args.is_empty() {
            return Err(ProcessError::EmptyCommand);
        }

        let owned = args
            .iter()
            .map(|arg| {
                CString::new(arg.as_bytes())
                    .map_err(|_| ProcessError::InvalidArgument(arg.clone()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut ptrs: Vec<*const c_char> = owned.iter().map(|arg| arg.as_ptr()).collect();
        ptrs.push(ptr::null());

        Ok(Argv { _owned: owned, ptrs })
    }

    fn program(&self) -> *const c_char {
        self.ptrs[0]
    }
}

/// Messages the child writes if its program image cannot be replaced.
struct ExecDiagnostics {
    not_found: Vec<u8>,
    cannot_execute: Vec<u8>,
}

impl ExecDiagnostics {
    fn new(program: &str) -> Self {
        Self {
            not_found: format!("nook: command not found: {}\n", program).into_bytes(),
            cannot_execute: format!("nook: cannot execute: {}\n", program).into_bytes(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Runs `args[0]` with `args` as its argument vector, resolving bare names
    /// through `PATH`. Blocks until the child exits unless `detached` is set.
    pub fn launch(
        &self,
        args: &[String],
        detached: bool,
        jobs: &mut JobRegistry,
    ) -> Result<Launch, ProcessError> {
        self.launch_to(args, detached, jobs, &mut io::stdout())
    }

    /// Like [`launch`](Self::launch), announcing detached jobs on `out`. A
    /// detached job is recorded before the announcement is written, so a
    /// failed write never loses track of a running child.
    pub fn launch_to(
        &self,
        args: &[String],
        detached: bool,
        jobs: &mut JobRegistry,
        out: &mut dyn Write,
    ) -> Result<Launch, ProcessError> {
        let argv = Argv::new(args)?;
        let diagnostics = ExecDiagnostics::new(&args[0]);

        // Buffered output must not be inherited; the child never flushes, so
        // a failure here is harmless.
        if let Err(e) = out.flush().and_then(|()| io::stderr().flush()) {
            debug!("flush before fork failed: {}", e);
        }

        // SAFETY: the child only calls execvp, write and _exit on buffers
        // prepared above.
        let pid = unsafe { libc::fork() };
        match pid {
            -1 => Err(ProcessError::Spawn(io::Error::last_os_error())),
            0 => run_child(&argv, &diagnostics),
            pid if detached => {
                jobs.record_detached(pid, args);
                writeln!(out, "Job {}", pid).and_then(|()| out.flush())?;
                Ok(Launch::Detached { pid })
            }
            pid => {
                let code = wait_for(pid)?;
                jobs.record_waited(pid, args);
                Ok(Launch::Waited { pid, code })
            }
        }
    }
}

/// Replaces the current program image. Only ever returns on failure.
fn exec(argv: &Argv) -> Result<Infallible, io::Error> {
    // SAFETY: `argv.ptrs` is a null-terminated array of pointers into
    // `argv._owned`, which outlives this call.
    unsafe {
        libc::execvp(argv.program(), argv.ptrs.as_ptr());
    }
    Err(io::Error::last_os_error())
}

fn run_child(argv: &Argv, diagnostics: &ExecDiagnostics) -> ! {
    // The Rust runtime ignores SIGPIPE; programs expect the default.
    // SAFETY: signal is async-signal-safe.
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }

    let err = match exec(argv) {
        Ok(never) => match never {},
        Err(err) => err,
    };

    let (message, status) = match err.raw_os_error() {
        Some(libc::ENOENT) | Some(libc::ENOTDIR) => (&diagnostics.not_found, EXIT_NOT_FOUND),
        _ => (&diagnostics.cannot_execute, EXIT_CANNOT_EXECUTE),
    };

    // SAFETY: write and _exit are async-signal-safe; nothing else runs in the
    // child after the fork.
    unsafe {
        libc::write(libc::STDERR_FILENO, message.as_ptr().cast(), message.len());
        libc::_exit(status)
    }
}

fn wait_for(pid: i32) -> Result<Option<i32>, ProcessError> {
    let mut status: libc::c_int = 0;
    loop {
        // SAFETY: `status` is a valid out pointer for the duration of the call.
        let rc = unsafe { libc::waitpid(pid, &mut status, 0) };
        if rc == pid {
            break;
        }
        let err = io::Error::last_os_error();
        if err.kind() != io::ErrorKind::Interrupted {
            return Err(ProcessError::Wait { pid, source: err });
        }
    }

    if libc::WIFEXITED(status) {
        let code = libc::WEXITSTATUS(status);
        debug!("process {} exited with status {}", pid, code);
        Ok(Some(code))
    } else {
        if libc::WIFSIGNALED(status) {
            debug!("process {} killed by signal {}", pid, libc::WTERMSIG(status));
        }
        Ok(None)
    }
}
