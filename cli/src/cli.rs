//! Command-line flags for `react-sync` and `react-deploy`.
use std::path::PathBuf;

use clap::{Args, Parser};

use crate::config::{CliOverrides, Tool};

/// Options shared by both tools.
#[derive(Args, Debug, Clone, Default)]
pub struct CommonOpts {
    /// Source directory (default: current directory)
    #[arg(short, long)]
    pub source: Option<String>,

    /// Target directory (default: current directory)
    #[arg(short, long)]
    pub target: Option<String>,

    /// Print what would happen without changing anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to config file (INI format with [DEFAULT] section)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip loading the default config file
    #[arg(long)]
    pub no_config: bool,

    /// Never prompt; fail where an answer would be needed
    #[arg(long)]
    pub non_interactive: bool,
}

impl CommonOpts {
    fn overrides(&self) -> CliOverrides {
        CliOverrides {
            source: self.source.clone(),
            target: self.target.clone(),
            dry_run: self.dry_run,
            verbose: self.verbose,
            non_interactive: self.non_interactive,
            ..CliOverrides::default()
        }
    }
}

/// Copy an exported React project into a git-tracked working tree.
#[derive(Parser, Debug)]
#[command(
    name = "react-sync",
    about = "Sync project files using rsync with safety checks",
    after_help = "Example: react-sync --source=./exported --target=./project -n -v",
    version = crate::VERSION
)]
pub struct SyncCli {
    #[command(flatten)]
    pub common: CommonOpts,
}

impl SyncCli {
    /// Flag values for the config resolver; the action is always
    /// `synchronize`.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            tool: Tool::Sync,
            action: Some(crate::actions::Action::Synchronize.identifier().to_string()),
            ..self.common.overrides()
        }
    }
}

/// Build and deploy helpers for a React project.
#[derive(Parser, Debug)]
#[command(
    name = "react-deploy",
    about = "Deploy React projects to static hosting and generate bundles",
    after_help = "Example: react-deploy --action=write-hosting-config --app-base-path=/user/repo/",
    version = crate::VERSION
)]
pub struct DeployCli {
    #[command(flatten)]
    pub common: CommonOpts,

    /// Action to perform (prompted when omitted)
    #[arg(long)]
    pub action: Option<String>,

    /// Base path for static hosting (e.g., /user/repo/)
    #[arg(long)]
    pub app_base_path: Option<String>,

    /// Application name for bundle generation
    #[arg(long)]
    pub app_name: Option<String>,

    /// Replace existing files without asking
    #[arg(long)]
    pub overwrite: bool,
}

impl DeployCli {
    /// Flag values for the config resolver.
    #[must_use]
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            tool: Tool::Deploy,
            action: self.action.clone(),
            app_base_path: self.app_base_path.clone(),
            app_name: self.app_name.clone(),
            overwrite: self.overwrite,
            ..self.common.overrides()
        }
    }
}
