//! `react-deploy`: build and publish actions for a React project.
use anyhow::Result;

use crate::cli::DeployCli;
use crate::config::{CONFIG_FILE_NAME, ConfigChoice, Environment};
use crate::exec::Executor;
use crate::logging::Log;
use crate::prompt::Prompter;

/// Run the requested (or selected) deploy action.
///
/// The default config file is looked up next to the tool, not in the
/// working directory.
///
/// # Errors
///
/// Returns an error if configuration, validation or the action fails.
pub fn run(
    cli: &DeployCli,
    env: &Environment,
    prompter: &dyn Prompter,
    executor: &dyn Executor,
    log: &dyn Log,
) -> Result<()> {
    let choice = ConfigChoice::from_flags(
        cli.common.config.as_deref(),
        cli.common.no_config,
        env.tool_dir.join(CONFIG_FILE_NAME),
    );
    let action = super::run_action(&cli.overrides(), &choice, env, prompter, executor, log)?;
    log.debug(&format!("{action} finished"));
    Ok(())
}
