//! `react-sync`: copy an exported project into the working tree.
use anyhow::Result;

use crate::cli::SyncCli;
use crate::config::{CONFIG_FILE_NAME, ConfigChoice, Environment};
use crate::exec::Executor;
use crate::logging::Log;
use crate::prompt::Prompter;

/// Run the synchronize action.
///
/// The default config file is looked up in the working directory.
///
/// # Errors
///
/// Returns an error if configuration, validation or rsync fails.
pub fn run(
    cli: &SyncCli,
    env: &Environment,
    prompter: &dyn Prompter,
    executor: &dyn Executor,
    log: &dyn Log,
) -> Result<()> {
    let choice = ConfigChoice::from_flags(
        cli.common.config.as_deref(),
        cli.common.no_config,
        env.cwd.join(CONFIG_FILE_NAME),
    );
    super::run_action(&cli.overrides(), &choice, env, prompter, executor, log)?;
    Ok(())
}
