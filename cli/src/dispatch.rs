//! Action selection and the handler behind each [`Action`].
use std::fs;
use std::path::Path;

use crate::actions::{
    Action, CONFIG_EXAMPLE, PROJECT_ENTRY, PROJECT_ENTRY_BACKUP, PROJECT_ENTRY_TEMPLATE,
};
use crate::config::{CONFIG_FILE_NAME, EffectiveConfig};
use crate::error::ToolError;
use crate::exec::{Executor, ProcessRunner, RunOutcome};
use crate::logging::Log;
use crate::operations::FileSystemOps;
use crate::prompt::Prompter;
use crate::sync_plan::SyncPlan;
use crate::templates::{BundleNames, bundle_config, hosting_config};
use crate::validate::validate;

/// Everything an action needs to run, borrowed for one invocation.
pub struct Dispatcher<'a> {
    config: &'a EffectiveConfig,
    prompter: &'a dyn Prompter,
    fs: &'a dyn FileSystemOps,
    executor: &'a dyn Executor,
    log: &'a dyn Log,
}

impl std::fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("config", self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> Dispatcher<'a> {
    /// Bundle the collaborators for one run.
    #[must_use]
    pub const fn new(
        config: &'a EffectiveConfig,
        prompter: &'a dyn Prompter,
        fs: &'a dyn FileSystemOps,
        executor: &'a dyn Executor,
        log: &'a dyn Log,
    ) -> Self {
        Self {
            config,
            prompter,
            fs,
            executor,
            log,
        }
    }

    /// Pick the action, validate it, and run its handler.
    ///
    /// Returns the action that ran. Validation and the handler run inside an
    /// `action` span whose `outcome` ends up `ok` or `failed`.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::MissingAction`] when no action is configured and
    /// prompting is disabled, and otherwise whatever the validator or the
    /// handler reports.
    pub fn dispatch(&self) -> Result<Action, ToolError> {
        let action = match self.config.action {
            Some(action) => action,
            None => self.select_action()?,
        };
        let span = tracing::info_span!(
            "action",
            action = action.identifier(),
            outcome = tracing::field::Empty
        );
        let result = span.in_scope(|| self.run(action));
        span.record("outcome", if result.is_ok() { "ok" } else { "failed" });
        result.map(|()| action)
    }

    fn run(&self, action: Action) -> Result<(), ToolError> {
        self.log.stage(action.spec().description);

        validate(self.config, action, self.prompter, self.fs, self.log)?;

        match action {
            Action::Synchronize => self.synchronize()?,
            Action::WriteHostingConfig => self.write_hosting_config()?,
            Action::WriteBundleConfig => self.write_bundle_config()?,
            Action::BuildForHosting | Action::PublishToHosting | Action::GenerateBundle => {
                self.run_command(action)?;
            }
            Action::UpdateIndexTsx => self.update_index_tsx()?,
            Action::GenerateConfig => self.generate_config()?,
        }
        Ok(())
    }

    /// Ask the operator to pick an action from the menu.
    fn select_action(&self) -> Result<Action, ToolError> {
        if !self.config.interactive {
            return Err(ToolError::MissingAction);
        }
        let labels: Vec<String> = Action::ALL
            .iter()
            .map(|a| format!("{:<22} {}", a.identifier(), a.spec().description))
            .collect();
        let options: Vec<&str> = labels.iter().map(String::as_str).collect();
        let index = self.prompter.select("Please select an action:", &options)?;
        Action::ALL
            .get(index)
            .copied()
            .ok_or(ToolError::MissingAction)
    }

    fn runner(&self) -> ProcessRunner<'a> {
        ProcessRunner::new(self.executor, self.log)
    }

    fn synchronize(&self) -> Result<(), ToolError> {
        let plan = SyncPlan::from_config(self.config);
        if self.config.verbose {
            self.log.info(&format!("Source: {}", plan.source.display()));
            self.log.info(&format!("Target: {}", plan.target.display()));
            if self.config.ignore_index_tsx {
                self.log.info("Excluding index.tsx from sync as configured");
            }
        }
        let outcome = self.runner().run(
            &plan.argv()?,
            &plan.source,
            self.config.dry_run,
            self.config.verbose,
        )?;
        if outcome == RunOutcome::Completed {
            self.log.info("Rsync operation completed successfully.");
        }
        Ok(())
    }

    fn write_hosting_config(&self) -> Result<(), ToolError> {
        let base_path = match self.config.app_base_path.as_deref() {
            Some(value) if !value.is_empty() => value.to_string(),
            _ if !self.config.interactive => {
                return Err(ToolError::MissingConfiguration(
                    "app_base_path (pass --app-base-path or set it in the config file)"
                        .to_string(),
                ));
            }
            _ => {
                let answer = self
                    .prompter
                    .ask("Enter the app base path (e.g., /user/repo/)")?;
                if answer.is_empty() {
                    return Err(ToolError::MissingConfiguration(
                        "app_base_path".to_string(),
                    ));
                }
                answer
            }
        };
        let file = self.write_output(Action::WriteHostingConfig, &hosting_config(&base_path))?;
        self.log.info(&format!("{file} uses app base path: {base_path}"));
        Ok(())
    }

    fn write_bundle_config(&self) -> Result<(), ToolError> {
        let app_name = self.app_name()?;
        let names = BundleNames::from_app_name(&app_name);
        if self.config.verbose {
            self.log.info(&format!("App name: {app_name}"));
            self.log.info(&format!("App name dashed: {}", names.dashed));
            self.log.info(&format!("App name capitalized: {}", names.caps));
        }
        let file = self.write_output(Action::WriteBundleConfig, &bundle_config(&names))?;
        self.log.info(&format!("{file} uses app name: {app_name}"));
        Ok(())
    }

    /// Configured app name, else the operator's answer, else the project
    /// folder name.
    fn app_name(&self) -> Result<String, ToolError> {
        if let Some(name) = self.config.app_name.as_deref()
            && !name.is_empty()
        {
            return Ok(name.to_string());
        }
        let folder = folder_name(self.config.project_dir());
        let answer = if self.config.interactive {
            self.prompter
                .ask(&format!("Enter the app name (default: {folder})"))?
        } else {
            String::new()
        };
        let name = if answer.is_empty() { folder } else { answer };
        if name.is_empty() {
            return Err(ToolError::MissingConfiguration("app_name".to_string()));
        }
        Ok(name)
    }

    /// Write `content` to the action's output file and return its name.
    fn write_output(&self, action: Action, content: &str) -> Result<&'static str, ToolError> {
        let Some(file) = action.spec().output else {
            return Err(ToolError::MissingConfiguration(format!(
                "{action} has no output file"
            )));
        };
        let path = self.config.project_dir().join(file);
        if self.config.dry_run {
            self.log.dry_run(&format!("would write {}:\n{content}", path.display()));
            return Ok(file);
        }
        fs::write(&path, content).map_err(|e| ToolError::io(&path, e))?;
        self.log.info(&format!("Created {}", path.display()));
        Ok(file)
    }

    fn run_command(&self, action: Action) -> Result<(), ToolError> {
        let Some(command) = action.spec().command else {
            return Ok(());
        };
        let argv: Vec<String> = command.iter().map(|s| (*s).to_string()).collect();
        let outcome = self.runner().run(
            &argv,
            self.config.project_dir(),
            self.config.dry_run,
            self.config.verbose,
        )?;
        if outcome == RunOutcome::Completed {
            self.log.info(&format!("{} completed successfully.", action.identifier()));
        }
        Ok(())
    }

    fn update_index_tsx(&self) -> Result<(), ToolError> {
        let project = self.config.project_dir();
        let entry = project.join(PROJECT_ENTRY);
        let backup = project.join(PROJECT_ENTRY_BACKUP);
        let template = self.config.tool_dir.join(PROJECT_ENTRY_TEMPLATE);

        if self.config.dry_run {
            self.log.dry_run(&format!(
                "would back up {} as {}",
                entry.display(),
                backup.display()
            ));
            self.log.dry_run(&format!(
                "would replace {} with {}",
                entry.display(),
                template.display()
            ));
            return Ok(());
        }

        copy(&entry, &backup)?;
        self.log.info(&format!("Created backup of {PROJECT_ENTRY} as {PROJECT_ENTRY_BACKUP}"));
        copy(&template, &entry)?;
        self.log.info(&format!(
            "Updated {PROJECT_ENTRY} with content from {}",
            template.display()
        ));
        Ok(())
    }

    fn generate_config(&self) -> Result<(), ToolError> {
        let example = self.config.tool_dir.join(CONFIG_EXAMPLE);
        let destination = self.config.project_dir().join(CONFIG_FILE_NAME);
        if self.config.dry_run {
            self.log.dry_run(&format!(
                "would copy {} to {}",
                example.display(),
                destination.display()
            ));
            return Ok(());
        }
        copy(&example, &destination)?;
        self.log.info(&format!("Created {}", destination.display()));
        Ok(())
    }
}

fn copy(from: &Path, to: &Path) -> Result<(), ToolError> {
    fs::read(from)
        .map_err(|e| ToolError::io(from, e))
        .and_then(|bytes| fs::write(to, bytes).map_err(|e| ToolError::io(to, e)))
}

fn folder_name(dir: &Path) -> String {
    dunce::canonicalize(dir)
        .unwrap_or_else(|_| dir.to_path_buf())
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
