//! How an event is classified and how it reads in the log file.
use tracing::{Level, Metadata};

/// Target of stage headers.
pub(super) const STAGE_TARGET: &str = "react_tools::stage";
/// Target of dry-run reports.
pub(super) const DRY_RUN_TARGET: &str = "react_tools::dry_run";

/// What an event means to the operator, derived from its level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Kind {
    Stage,
    DryRun,
    Info,
    Debug,
    Warn,
    Error,
}

impl Kind {
    pub(super) fn of(metadata: &Metadata<'_>) -> Self {
        classify(*metadata.level(), metadata.target())
    }

    /// Column tag in the log file.
    pub(super) const fn tag(self) -> &'static str {
        match self {
            Self::Stage => "stage",
            Self::DryRun => "dry-run",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

fn classify(level: Level, target: &str) -> Kind {
    match level {
        Level::ERROR => Kind::Error,
        Level::WARN => Kind::Warn,
        Level::INFO if target == STAGE_TARGET => Kind::Stage,
        Level::INFO if target == DRY_RUN_TARGET => Kind::DryRun,
        Level::INFO => Kind::Info,
        _ => Kind::Debug,
    }
}

/// Width of the tag column.
const TAG_WIDTH: usize = 7;

/// One log file entry: `HH:MM:SS tag     [action] message`.
///
/// Continuation lines of a multi-line message (a dry-run file dump, say)
/// are indented under the message so every entry starts with a timestamp.
pub(super) fn file_line(clock: &str, tag: &str, action: Option<&str>, msg: &str) -> String {
    let prefix = format!("{clock} {tag:<TAG_WIDTH$} ");
    let scope = action.map(|a| format!("[{a}] ")).unwrap_or_default();
    let indent = " ".repeat(prefix.len());
    let body = msg.replace('\n', &format!("\n{indent}"));
    format!("{prefix}{scope}{body}")
}
