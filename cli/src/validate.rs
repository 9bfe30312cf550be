//! Precondition checks run before an action touches anything.
//!
//! Validation only reads the filesystem. It may prompt the operator, but it
//! never writes, so a rejected run leaves no trace.
use std::path::Path;

use crate::actions::{Action, Precondition};
use crate::config::EffectiveConfig;
use crate::error::{PreconditionKind, ToolError};
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::prompt::Prompter;

/// Check every precondition of `action` against `config`.
///
/// # Errors
///
/// - [`ToolError::PreconditionFailed`] for a missing marker, project file or
///   template, or a confirmation that was declined or could not be asked
/// - [`ToolError::FileAlreadyExists`] when the destination exists and
///   `--overwrite` was not given
/// - [`ToolError::MissingDependency`] when a prerequisite action has not run
/// - [`ToolError::Interrupted`] if a prompt is interrupted
pub fn validate(
    config: &EffectiveConfig,
    action: Action,
    prompter: &dyn Prompter,
    fs: &dyn FileSystemOps,
    log: &dyn Log,
) -> Result<(), ToolError> {
    let spec = action.spec();
    for precondition in spec.preconditions {
        check(config, precondition, spec.destructive, prompter, fs, log)?;
    }
    Ok(())
}

/// `--overwrite` only counts for a `destructive` action.
fn check(
    config: &EffectiveConfig,
    precondition: &Precondition,
    destructive: bool,
    prompter: &dyn Prompter,
    fs: &dyn FileSystemOps,
    log: &dyn Log,
) -> Result<(), ToolError> {
    let project = config.project_dir();
    let overwrite = config.overwrite && destructive;
    match *precondition {
        Precondition::SyncMarker(marker) => {
            check_marker(config, "source", &config.source_path, marker, prompter, fs, log)?;
            check_marker(config, "target", &config.target_path, marker, prompter, fs, log)
        }
        Precondition::ProjectFile(file) => {
            let path = project.join(file);
            if fs.is_file(&path) {
                Ok(())
            } else {
                log.error(&format!(
                    "{file} not found in {}; not a React project folder",
                    project.display()
                ));
                Err(precondition_failed(PreconditionKind::MarkerMissing, path))
            }
        }
        Precondition::Template(file) => {
            let path = config.tool_dir.join(file);
            if fs.is_file(&path) {
                Ok(())
            } else {
                Err(precondition_failed(PreconditionKind::TemplateMissing, path))
            }
        }
        Precondition::FreshDestination(file) => {
            let path = project.join(file);
            if !fs.exists(&path) {
                Ok(())
            } else if overwrite {
                log.warn(&format!("{} exists and will be overwritten", path.display()));
                Ok(())
            } else {
                Err(ToolError::FileAlreadyExists(path))
            }
        }
        Precondition::Requires { file, produced_by } => {
            let path = project.join(file);
            if fs.is_file(&path) {
                Ok(())
            } else {
                Err(ToolError::MissingDependency {
                    file: path,
                    prerequisite: produced_by,
                })
            }
        }
        Precondition::Confirm { file, question } => {
            let path = project.join(file);
            if overwrite {
                log.debug(&format!("--overwrite given; not asking about {file}"));
                Ok(())
            } else if config.dry_run {
                log.dry_run(&format!("would ask: {question}"));
                Ok(())
            } else if config.interactive && prompter.confirm(question)? {
                Ok(())
            } else {
                log.info("Update cancelled.");
                Err(precondition_failed(PreconditionKind::NotConfirmed, path))
            }
        }
    }
}

/// A missing sync marker is fatal only when the operator cannot be asked or
/// declines to continue.
fn check_marker(
    config: &EffectiveConfig,
    label: &str,
    root: &Path,
    marker: &str,
    prompter: &dyn Prompter,
    fs: &dyn FileSystemOps,
    log: &dyn Log,
) -> Result<(), ToolError> {
    let path = root.join(marker);
    if fs.is_file(&path) {
        log.debug(&format!("found {marker} in {label}"));
        return Ok(());
    }
    log.warn(&format!("{marker} not found in {label} ({})", path.display()));
    if config.interactive && prompter.confirm("Continue anyway?")? {
        return Ok(());
    }
    if config.interactive {
        log.info("Aborted by user.");
    }
    Err(precondition_failed(PreconditionKind::MarkerMissing, path))
}

fn precondition_failed(kind: PreconditionKind, path: impl Into<std::path::PathBuf>) -> ToolError {
    ToolError::PreconditionFailed {
        kind,
        path: path.into(),
    }
}
