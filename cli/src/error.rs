//! Error taxonomy shared by both tools.
//!
//! Library code returns [`ToolError`]; the command layer wraps I/O with
//! [`anyhow`] context and the binaries downcast back to [`ToolError`] to pick
//! the process exit status via [`ToolError::exit_code`].
//!
//! # Exit codes
//!
//! ```text
//! 0    success
//! n    exit code of a failed external command, passed through unchanged
//! 64   UnknownAction
//! 65   InvalidConfig
//! 66   ConfigNotFound
//! 67   MissingAction
//! 68   PreconditionFailed
//! 69   MissingDependency
//! 73   FileAlreadyExists
//! 74   Io
//! 78   MissingConfiguration
//! 127  ExecutableNotFound
//! 130  Interrupted
//! ```

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::actions::Action;

/// Reserved process exit codes, one per error kind.
pub mod exit {
    /// Generic failure for errors that are not a [`ToolError`](super::ToolError).
    pub const FAILURE: u8 = 1;
    /// The requested action is not one of the known identifiers.
    pub const UNKNOWN_ACTION: u8 = 64;
    /// The config file exists but cannot be parsed.
    pub const INVALID_CONFIG: u8 = 65;
    /// An explicitly requested config file does not exist.
    pub const CONFIG_NOT_FOUND: u8 = 66;
    /// No action was given and prompting is disabled.
    pub const MISSING_ACTION: u8 = 67;
    /// A marker file or template is missing, or the operator declined.
    pub const PRECONDITION_FAILED: u8 = 68;
    /// A file produced by a prerequisite action is missing.
    pub const MISSING_DEPENDENCY: u8 = 69;
    /// A destination file exists and `--overwrite` was not given.
    pub const FILE_ALREADY_EXISTS: u8 = 73;
    /// Reading or writing a file failed.
    pub const IO: u8 = 74;
    /// A required setting has no value.
    pub const MISSING_CONFIGURATION: u8 = 78;
    /// The external program could not be located or started.
    pub const EXECUTABLE_NOT_FOUND: u8 = 127;
    /// The operator interrupted a prompt.
    pub const INTERRUPTED: u8 = 130;
}

/// Why a precondition check rejected the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreconditionKind {
    /// A marker file that identifies a project root is absent.
    MarkerMissing,
    /// A template shipped next to the tool is absent.
    TemplateMissing,
    /// A destructive step needed confirmation that was not given.
    NotConfirmed,
}

impl fmt::Display for PreconditionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MarkerMissing => "marker file missing",
            Self::TemplateMissing => "template missing",
            Self::NotConfirmed => "not confirmed",
        })
    }
}

/// Every way a sync or deploy invocation can fail.
#[derive(Error, Debug)]
pub enum ToolError {
    /// `--config` pointed at a file that does not exist.
    #[error("config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// The config file could not be parsed.
    #[error("invalid config file {}: {message}", path.display())]
    InvalidConfig {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// A required setting resolved to nothing.
    #[error("missing configuration: {0}")]
    MissingConfiguration(String),

    /// A precondition rejected the run.
    #[error("precondition failed: {kind} ({})", path.display())]
    PreconditionFailed {
        /// What went wrong.
        kind: PreconditionKind,
        /// The file the check was about.
        path: PathBuf,
    },

    /// Refusing to replace an existing file without `--overwrite`.
    #[error("{} already exists (pass --overwrite to replace it)", .0.display())]
    FileAlreadyExists(PathBuf),

    /// A file produced by another action has not been created yet.
    #[error("{} not found; run --action={prerequisite} first", file.display())]
    MissingDependency {
        /// The missing file.
        file: PathBuf,
        /// The action that produces it.
        prerequisite: Action,
    },

    /// The action identifier is not recognized.
    #[error("unknown action '{0}' (valid actions: {valid})", valid = Action::identifiers().join(", "))]
    UnknownAction(String),

    /// No action was supplied and the run is non-interactive.
    #[error("no action given and prompting is disabled; pass --action")]
    MissingAction,

    /// The external program is not installed or could not be started.
    #[error("'{0}' command not found; make sure it is installed and on PATH")]
    ExecutableNotFound(String),

    /// The external program ran and exited non-zero.
    #[error("{program} failed with exit code {code}")]
    ExternalCommandFailed {
        /// Program name (first argv element).
        program: String,
        /// Its exit code.
        code: i32,
    },

    /// The operator interrupted a prompt (Ctrl-C or end of input).
    #[error("interrupted")]
    Interrupted,

    /// A filesystem operation failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Path being read or written.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl ToolError {
    /// Build an [`Io`](Self::Io) error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// The process exit status for this error.
    ///
    /// External command failures pass the child's code through; codes that
    /// do not fit a `u8` (or are zero) collapse to [`exit::FAILURE`].
    #[must_use]
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::ConfigNotFound(_) => exit::CONFIG_NOT_FOUND,
            Self::InvalidConfig { .. } => exit::INVALID_CONFIG,
            Self::MissingConfiguration(_) => exit::MISSING_CONFIGURATION,
            Self::PreconditionFailed { .. } => exit::PRECONDITION_FAILED,
            Self::FileAlreadyExists(_) => exit::FILE_ALREADY_EXISTS,
            Self::MissingDependency { .. } => exit::MISSING_DEPENDENCY,
            Self::UnknownAction(_) => exit::UNKNOWN_ACTION,
            Self::MissingAction => exit::MISSING_ACTION,
            Self::ExecutableNotFound(_) => exit::EXECUTABLE_NOT_FOUND,
            Self::ExternalCommandFailed { code, .. } => u8::try_from(*code)
                .ok()
                .filter(|c| *c != 0)
                .unwrap_or(exit::FAILURE),
            Self::Interrupted => exit::INTERRUPTED,
            Self::Io { .. } => exit::IO,
        }
    }
}
