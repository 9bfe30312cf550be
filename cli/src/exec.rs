//! External process execution.
//!
//! [`ProcessRunner`] prints, dry-runs and spawns argument vectors through an
//! [`Executor`], translating the outcome into [`ToolError`]s. Production code
//! uses [`SystemExecutor`]; unit tests use the `mockall`-generated
//! `MockExecutor`.
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use crate::error::ToolError;
use crate::logging::Log;

/// Low-level process spawning.
#[cfg_attr(test, mockall::automock)]
pub trait Executor {
    /// Resolve `program` to an executable path, if it is installed.
    fn locate(&self, program: &str) -> Option<PathBuf>;

    /// Spawn `program` with `args` in `dir`, stdio inherited, and wait for it.
    ///
    /// Returns the exit code; a child killed by a signal reports
    /// `128 + signal`.
    ///
    /// # Errors
    ///
    /// Returns the spawn error if the process could not be started, or
    /// [`io::ErrorKind::NotADirectory`] if `dir` is not a directory.
    fn status(&self, program: &Path, args: &[String], dir: &Path) -> io::Result<i32>;
}

/// [`Executor`] backed by [`std::process::Command`] and the `which` crate.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        which::which(program).ok()
    }

    fn status(&self, program: &Path, args: &[String], dir: &Path) -> io::Result<i32> {
        if !dir.is_dir() {
            return Err(io::Error::from(io::ErrorKind::NotADirectory));
        }
        let status = Command::new(program).args(args).current_dir(dir).status()?;
        Ok(exit_code_of(status))
    }
}

#[cfg(unix)]
fn exit_code_of(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt as _;
    status
        .code()
        .or_else(|| status.signal().map(|sig| 128 + sig))
        .unwrap_or(1)
}

#[cfg(not(unix))]
fn exit_code_of(status: ExitStatus) -> i32 {
    status.code().unwrap_or(1)
}

/// What [`ProcessRunner::run`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The process ran and exited zero.
    Completed,
    /// Dry-run: the command was reported but not spawned.
    DryRun,
}

/// Render an argument vector for display, quoting arguments with whitespace.
#[must_use]
pub fn render_argv(argv: &[String]) -> String {
    argv.iter()
        .map(|arg| {
            if arg.is_empty() || arg.chars().any(char::is_whitespace) {
                format!("\"{}\"", arg.replace('"', "\\\""))
            } else {
                arg.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Runs external commands on behalf of an action.
pub struct ProcessRunner<'a> {
    executor: &'a dyn Executor,
    log: &'a dyn Log,
}

impl std::fmt::Debug for ProcessRunner<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessRunner").finish_non_exhaustive()
    }
}

impl<'a> ProcessRunner<'a> {
    /// Create a runner spawning through `executor` and reporting to `log`.
    #[must_use]
    pub const fn new(executor: &'a dyn Executor, log: &'a dyn Log) -> Self {
        Self { executor, log }
    }

    /// Run `argv` with `dir` as the working directory.
    ///
    /// In dry-run mode the command is reported and nothing is spawned. With
    /// `verbose` the command line is echoed before anything else happens.
    ///
    /// # Errors
    ///
    /// - [`ToolError::ExecutableNotFound`] if `argv` is empty or the program
    ///   cannot be located or started
    /// - [`ToolError::ExternalCommandFailed`] if it exits non-zero
    /// - [`ToolError::Io`] for any other spawn failure
    pub fn run(
        &self,
        argv: &[String],
        dir: &Path,
        dry_run: bool,
        verbose: bool,
    ) -> Result<RunOutcome, ToolError> {
        let Some((program, args)) = argv.split_first() else {
            return Err(ToolError::ExecutableNotFound(String::new()));
        };
        let rendered = render_argv(argv);

        if verbose {
            self.log.info(&format!("running: {rendered}"));
        }
        if dry_run {
            self.log.dry_run(&format!("would run: {rendered}"));
            return Ok(RunOutcome::DryRun);
        }
        self.log.debug(&format!("{rendered} (in {})", dir.display()));

        let resolved = self
            .executor
            .locate(program)
            .ok_or_else(|| ToolError::ExecutableNotFound(program.clone()))?;

        let code = self
            .executor
            .status(&resolved, args, dir)
            .map_err(|e| match e.kind() {
                io::ErrorKind::NotADirectory => ToolError::io(dir, e),
                io::ErrorKind::NotFound | io::ErrorKind::PermissionDenied => {
                    ToolError::ExecutableNotFound(program.clone())
                }
                _ => ToolError::io(resolved.clone(), e),
            })?;

        if code == 0 {
            Ok(RunOutcome::Completed)
        } else {
            Err(ToolError::ExternalCommandFailed {
                program: program.clone(),
                code,
            })
        }
    }
}
