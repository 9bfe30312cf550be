//! Shared plumbing for the `react-sync` and `react-deploy` entry points.
pub mod deploy;
pub mod sync;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context as _, Result};

use crate::actions::Action;
use crate::config::{self, CliOverrides, ConfigChoice, Environment};
use crate::dispatch::Dispatcher;
use crate::error::{ToolError, exit};
use crate::exec::Executor;
use crate::logging::{self, Log, Logger};
use crate::operations::SystemFileSystemOps;
use crate::prompt::{NonInteractive, Prompter, TerminalPrompter};

/// Environment variable that overrides the directory holding the templates
/// and the deploy tool's default config.
pub const TOOL_DIR_ENV: &str = "REACT_TOOLS_DIR";

/// Install the tracing subscriber and return the logger for `tool`.
#[must_use]
pub fn init_logging(verbose: bool, tool: &str) -> Logger {
    logging::init_subscriber(verbose, tool);
    let log = Logger::new(tool);
    log.debug(&format!("react-{tool} {}", crate::VERSION));
    if let Some(path) = log.log_path() {
        log.debug(&format!("log file: {}", path.display()));
    }
    log
}

/// Exit with status 130 when the operator presses Ctrl-C.
pub fn install_interrupt_handler(log: &dyn Log) {
    if let Err(e) = ctrlc::set_handler(|| {
        println!();
        std::process::exit(i32::from(exit::INTERRUPTED));
    }) {
        log.warn(&format!("could not install interrupt handler: {e}"));
    }
}

/// The working directory and the tool directory of this process.
///
/// # Errors
///
/// Returns an error if either directory cannot be determined.
pub fn environment() -> Result<Environment> {
    let cwd = std::env::current_dir().context("failed to determine the working directory")?;
    let tool_dir = match std::env::var_os(TOOL_DIR_ENV) {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => executable_dir()?,
    };
    Ok(Environment { cwd, tool_dir })
}

fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to locate the running executable")?;
    let exe = dunce::canonicalize(&exe).unwrap_or(exe);
    exe.parent()
        .map(Path::to_path_buf)
        .context("running executable has no parent directory")
}

/// The prompter for this run: the terminal, or a stand-in that never agrees.
#[must_use]
pub fn prompter(non_interactive: bool) -> Box<dyn Prompter> {
    if non_interactive {
        Box::new(NonInteractive)
    } else {
        Box::new(TerminalPrompter)
    }
}

/// Resolve the configuration and run the selected action.
///
/// # Errors
///
/// Returns the [`ToolError`] from resolution, validation or the action.
pub fn run_action(
    overrides: &CliOverrides,
    choice: &ConfigChoice,
    env: &Environment,
    prompter: &dyn Prompter,
    executor: &dyn Executor,
    log: &dyn Log,
) -> Result<Action> {
    if overrides.verbose {
        match choice {
            ConfigChoice::Explicit(path) | ConfigChoice::Discover(path) => {
                log.info(&format!("Trying to reach config file at: {}", path.display()));
            }
            ConfigChoice::Disabled => log.info("Skipping config file (--no-config)"),
        }
    }

    let config = config::resolve(overrides, choice, env)?;

    match &config.config_file {
        Some(path) => log.debug(&format!("loaded config file {}", path.display())),
        None => log.debug("no config file loaded"),
    }
    log.debug(&format!(
        "source={} target={} tool_dir={}",
        config.source_path.display(),
        config.target_path.display(),
        config.tool_dir.display()
    ));

    let fs = SystemFileSystemOps;
    let action = Dispatcher::new(&config, prompter, &fs, executor, log).dispatch()?;
    Ok(action)
}

/// Exit status for a failed run: the [`ToolError`]'s code, else 1.
#[must_use]
pub fn exit_status(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<ToolError>()
        .map_or(exit::FAILURE, ToolError::exit_code)
}

/// Log the outcome and turn it into the process exit status.
pub fn finish(result: Result<()>, log: &dyn Log) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log.error(&format!("{e:#}"));
            ExitCode::from(exit_status(&e))
        }
    }
}
