use std::process::ExitCode;

use clap::Parser;

use react_tools::cli::SyncCli;
use react_tools::commands;
use react_tools::exec::SystemExecutor;

fn main() -> ExitCode {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = SyncCli::parse();
    let log = commands::init_logging(args.common.verbose, "sync");
    commands::install_interrupt_handler(&log);

    let prompter = commands::prompter(args.common.non_interactive);
    let result = commands::environment()
        .and_then(|env| commands::sync::run(&args, &env, prompter.as_ref(), &SystemExecutor, &log));
    commands::finish(result, &log)
}
