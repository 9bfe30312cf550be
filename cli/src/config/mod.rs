//! Layered configuration: command-line flags over the config file's
//! `[DEFAULT]` section over built-in defaults.
pub mod ini;

use std::path::{Path, PathBuf};

use crate::actions::Action;
use crate::error::ToolError;

/// File name looked up when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = "config-deploy.conf";

/// The entry point being run. It decides which config-file keys apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Tool {
    /// `react-sync`: every key.
    #[default]
    Sync,
    /// `react-deploy`: only `app_base_path` and `app_name`. The project is
    /// `--target` or the working directory, never a path from the file.
    Deploy,
}

impl Tool {
    /// Drop the settings this tool does not read from a config file.
    #[must_use]
    pub fn file_settings(self, file: FileSettings) -> FileSettings {
        match self {
            Self::Sync => file,
            Self::Deploy => FileSettings {
                app_base_path: file.app_base_path,
                app_name: file.app_name,
                ..FileSettings::default()
            },
        }
    }
}

/// Values supplied on the command line. `None` means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOverrides {
    /// Which tool the flags were given to.
    pub tool: Tool,
    /// `--source`
    pub source: Option<String>,
    /// `--target`
    pub target: Option<String>,
    /// `--action`, unparsed.
    pub action: Option<String>,
    /// `--app-base-path`
    pub app_base_path: Option<String>,
    /// `--app-name`
    pub app_name: Option<String>,
    /// `--dry-run`
    pub dry_run: bool,
    /// `--verbose`
    pub verbose: bool,
    /// `--overwrite`
    pub overwrite: bool,
    /// `--non-interactive`
    pub non_interactive: bool,
}

/// Which config file, if any, to read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigChoice {
    /// `--config PATH`; the file must exist.
    Explicit(PathBuf),
    /// A default location; silently skipped when absent.
    Discover(PathBuf),
    /// `--no-config` without `--config`.
    Disabled,
}

impl ConfigChoice {
    /// Pick the config file from the `--config` / `--no-config` flags and the
    /// tool's default location.
    #[must_use]
    pub fn from_flags(explicit: Option<&Path>, no_config: bool, default: PathBuf) -> Self {
        match explicit {
            Some(path) => Self::Explicit(path.to_path_buf()),
            None if no_config => Self::Disabled,
            None => Self::Discover(default),
        }
    }
}

/// Process-level facts the resolver falls back on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Current working directory; default for both sync paths.
    pub cwd: PathBuf,
    /// Directory holding the tool's templates and default config.
    pub tool_dir: PathBuf,
}

/// Settings read from a config file's `[DEFAULT]` section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSettings {
    /// `source`
    pub source: Option<String>,
    /// `target`
    pub target: Option<String>,
    /// `app_base_path`
    pub app_base_path: Option<String>,
    /// `app_name`
    pub app_name: Option<String>,
    /// `ignore_index_tsx`
    pub ignore_index_tsx: Option<bool>,
}

impl FileSettings {
    /// Read settings from `path`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Io`] if the file cannot be read and
    /// [`ToolError::InvalidConfig`] if it cannot be parsed.
    pub fn load(path: &Path) -> Result<Self, ToolError> {
        let content = std::fs::read_to_string(path).map_err(|e| ToolError::io(path, e))?;
        Self::parse(&content).map_err(|e| ToolError::InvalidConfig {
            path: path.to_path_buf(),
            message: format!("{e:#}"),
        })
    }

    /// Parse settings from INI text. Unknown keys are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error on INI syntax errors or a non-boolean
    /// `ignore_index_tsx`.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let section = ini::default_entries(content)?;
        let text = |key: &str| section.get(key).map(str::to_string);
        let ignore_index_tsx = section
            .get("ignore_index_tsx")
            .map(|v| {
                ini::parse_bool(v)
                    .ok_or_else(|| anyhow::anyhow!("ignore_index_tsx: not a boolean: {v}"))
            })
            .transpose()?;

        Ok(Self {
            source: text("source"),
            target: text("target"),
            app_base_path: text("app_base_path"),
            app_name: text("app_name"),
            ignore_index_tsx,
        })
    }
}

/// Fully resolved settings for one invocation. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectiveConfig {
    /// Directory copied from.
    pub source_path: PathBuf,
    /// Directory copied into. For `react-deploy` it is the project directory:
    /// `--target` or the working directory.
    pub target_path: PathBuf,
    /// Requested action, `None` when the dispatcher has to ask.
    pub action: Option<Action>,
    /// Base path for the static hosting config.
    pub app_base_path: Option<String>,
    /// Application name for the bundle config.
    pub app_name: Option<String>,
    /// Print what would happen without changing anything.
    pub dry_run: bool,
    /// Echo commands and extra detail.
    pub verbose: bool,
    /// Leave `index.tsx` out of synchronization.
    pub ignore_index_tsx: bool,
    /// Allow replacing existing files.
    pub overwrite: bool,
    /// Whether the operator can be prompted.
    pub interactive: bool,
    /// Directory holding templates shipped with the tool.
    pub tool_dir: PathBuf,
    /// Config file that was actually read.
    pub config_file: Option<PathBuf>,
}

impl EffectiveConfig {
    /// Directory that deploy actions read from and write into.
    #[must_use]
    pub fn project_dir(&self) -> &Path {
        &self.target_path
    }
}

/// Merge flags, the selected config file and defaults.
///
/// # Errors
///
/// - [`ToolError::ConfigNotFound`] when an explicit config file is missing
/// - [`ToolError::InvalidConfig`] when the config file cannot be parsed
/// - [`ToolError::MissingConfiguration`] when both paths resolve to empty
/// - [`ToolError::UnknownAction`] when `--action` is not recognized
pub fn resolve(
    cli: &CliOverrides,
    choice: &ConfigChoice,
    env: &Environment,
) -> Result<EffectiveConfig, ToolError> {
    let (file, config_file) = load_choice(choice)?;
    let file = cli.tool.file_settings(file);

    let source = pick(cli.source.as_deref(), file.source.as_deref());
    let target = pick(cli.target.as_deref(), file.target.as_deref());

    let (source_path, target_path) = match (source, target) {
        (Some(s), Some(t)) if s.is_empty() && t.is_empty() => {
            return Err(ToolError::MissingConfiguration(
                "either source or target must be provided".to_string(),
            ));
        }
        (s, t) => (to_path(s, &env.cwd), to_path(t, &env.cwd)),
    };

    let action = cli
        .action
        .as_deref()
        .map(str::parse::<Action>)
        .transpose()?;

    Ok(EffectiveConfig {
        source_path,
        target_path,
        action,
        app_base_path: pick(cli.app_base_path.as_deref(), file.app_base_path.as_deref())
            .map(str::to_string),
        app_name: pick(cli.app_name.as_deref(), file.app_name.as_deref()).map(str::to_string),
        dry_run: cli.dry_run,
        verbose: cli.verbose,
        ignore_index_tsx: file.ignore_index_tsx.unwrap_or(false),
        overwrite: cli.overwrite,
        interactive: !cli.non_interactive,
        tool_dir: env.tool_dir.clone(),
        config_file,
    })
}

fn load_choice(choice: &ConfigChoice) -> Result<(FileSettings, Option<PathBuf>), ToolError> {
    match choice {
        ConfigChoice::Explicit(path) => {
            if !path.is_file() {
                return Err(ToolError::ConfigNotFound(path.clone()));
            }
            Ok((FileSettings::load(path)?, Some(path.clone())))
        }
        ConfigChoice::Discover(path) if path.is_file() => {
            Ok((FileSettings::load(path)?, Some(path.clone())))
        }
        ConfigChoice::Discover(_) | ConfigChoice::Disabled => Ok((FileSettings::default(), None)),
    }
}

/// Flag value if given, else config value, with surrounding quotes removed.
fn pick<'a>(cli: Option<&'a str>, file: Option<&'a str>) -> Option<&'a str> {
    cli.or(file).map(strip_quotes)
}

/// Remove one pair of matching surrounding `"` or `'`.
#[must_use]
pub fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2
            && let Some(inner) = value
                .strip_prefix(quote)
                .and_then(|v| v.strip_suffix(quote))
        {
            return inner;
        }
    }
    value
}

/// Resolve a path value against `cwd`; unset or empty means `cwd` itself.
fn to_path(value: Option<&str>, cwd: &Path) -> PathBuf {
    match value {
        Some(v) if !v.is_empty() => cwd.join(v),
        _ => cwd.to_path_buf(),
    }
}
