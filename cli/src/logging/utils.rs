//! Log file location and timestamps.
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use chrono::{DateTime, Utc};

/// Overrides the directory log files are written to.
pub(super) const LOG_DIR_ENV: &str = "REACT_TOOLS_LOG_DIR";

/// Directory for log files, looked up through `var`.
///
/// `REACT_TOOLS_LOG_DIR` wins, then `$XDG_CACHE_HOME/react-tools`, then
/// `~/.cache/react-tools`. `None` when no home directory is known.
pub(super) fn log_dir(var: impl Fn(&str) -> Option<OsString>) -> Option<PathBuf> {
    let set = |key: &str| var(key).filter(|v| !v.is_empty()).map(PathBuf::from);
    if let Some(dir) = set(LOG_DIR_ENV) {
        return Some(dir);
    }
    let cache = set("XDG_CACHE_HOME")
        .or_else(|| set("HOME").or_else(|| set("USERPROFILE")).map(|h| h.join(".cache")))?;
    Some(cache.join("react-tools"))
}

/// Log file for `tool`, with its directory created.
pub(super) fn log_file_path(tool: &str) -> Option<PathBuf> {
    let dir = log_dir(|key| std::env::var_os(key))?;
    fs::create_dir_all(&dir).ok()?;
    Some(dir.join(format!("{tool}.log")))
}

/// `HH:MM:SS`, the prefix of every log line.
pub(super) fn clock(now: &DateTime<Utc>) -> String {
    now.format("%H:%M:%S").to_string()
}

/// `YYYY-MM-DD HH:MM:SS UTC`, for the run header.
pub(super) fn started_at(now: &DateTime<Utc>) -> String {
    now.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}
