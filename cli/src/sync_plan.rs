//! The rsync invocation behind the synchronize action.
use std::path::{Path, PathBuf};

use crate::actions::PROJECT_ENTRY;
use crate::config::EffectiveConfig;
use crate::error::ToolError;

/// Paths that are never copied from the export into the project.
pub const DEFAULT_EXCLUDES: [&str; 7] = [
    "node_modules",
    "dist",
    ".git",
    ".gitignore",
    "vite.config.ts",
    "package.json",
    "package-lock.json",
];

/// One additive copy from `source` into `target`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncPlan {
    /// Directory copied from.
    pub source: PathBuf,
    /// Directory copied into.
    pub target: PathBuf,
    /// Patterns passed to `--exclude`, in order.
    pub excludes: Vec<&'static str>,
    /// Pass `--dry-run` to rsync.
    pub dry_run: bool,
}

impl SyncPlan {
    /// Build the plan for `config`.
    #[must_use]
    pub fn from_config(config: &EffectiveConfig) -> Self {
        let mut excludes = DEFAULT_EXCLUDES.to_vec();
        if config.ignore_index_tsx {
            excludes.push(PROJECT_ENTRY);
        }
        Self {
            source: config.source_path.clone(),
            target: config.target_path.clone(),
            excludes,
            dry_run: config.dry_run,
        }
    }

    /// The rsync argument vector.
    ///
    /// Both roots get a trailing `/` so their contents, not the directories
    /// themselves, are copied. `--delete` is never passed.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Io`] if either root is not valid UTF-8.
    pub fn argv(&self) -> Result<Vec<String>, ToolError> {
        let mut argv = vec!["rsync".to_string(), "-av".to_string()];
        argv.extend(self.excludes.iter().map(|p| format!("--exclude={p}")));
        if self.dry_run {
            argv.push("--dry-run".to_string());
        }
        argv.push(with_trailing_slash(&self.source)?);
        argv.push(with_trailing_slash(&self.target)?);
        Ok(argv)
    }
}

fn with_trailing_slash(path: &Path) -> Result<String, ToolError> {
    let s = path.to_str().ok_or_else(|| {
        ToolError::io(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidData, "path is not valid UTF-8"),
        )
    })?;
    Ok(format!("{}/", s.trim_end_matches('/')))
}
