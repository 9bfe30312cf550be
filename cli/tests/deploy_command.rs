#![allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::wildcard_imports,
    clippy::indexing_slicing
)]
//! Integration tests for `react-deploy`.
//!
//! The project directory is the workspace's `site/` (the working directory
//! of every run); templates and the default config live in `tools/`.

mod common;

use clap::Parser;
use common::*;
use react_tools::cli::DeployCli;
use react_tools::commands::{self, exit_status};

fn cli(args: &[&str]) -> DeployCli {
    DeployCli::parse_from(std::iter::once("react-deploy").chain(args.iter().copied()))
}

struct Run {
    exec: RecordingExecutor,
    log: CapturedLog,
    prompter: ScriptedPrompter,
}

impl Run {
    fn new(answers: &[&str]) -> Self {
        Self {
            exec: RecordingExecutor::exiting_with(0),
            log: CapturedLog::default(),
            prompter: ScriptedPrompter::new(answers),
        }
    }

    fn exec(self, exec: RecordingExecutor) -> Self {
        Self { exec, ..self }
    }

    fn deploy(&self, ws: &Workspace, args: &[&str]) -> anyhow::Result<()> {
        commands::deploy::run(
            &cli(args),
            &ws.env_in(&ws.site()),
            &self.prompter,
            &self.exec,
            &self.log,
        )
    }
}

#[test]
fn legacy_alias_writes_hosting_config() {
    let ws = Workspace::new();
    let run = Run::new(&[]);

    run.deploy(&ws, &["--action=add-config-gh-pages", "--app-base-path=/user/repo/"])
        .unwrap();

    let content = ws.read(&ws.site(), "vite.gh-pages.config.ts");
    assert!(content.contains("base: '/user/repo/'"));
    assert!(run.prompter.asked().is_empty());
}

#[test]
fn default_config_is_read_from_tool_directory() {
    let ws = Workspace::new();
    ws.write(&ws.tools(), "config-deploy.conf", "[DEFAULT]\napp_base_path = /from/file/\n");
    // A config in the working directory is not the deploy tool's default.
    ws.write(&ws.site(), "config-deploy.conf", "[DEFAULT]\napp_base_path = /wrong/\n");

    Run::new(&[])
        .deploy(&ws, &["--action", "write-hosting-config"])
        .unwrap();

    assert!(ws.read(&ws.site(), "vite.gh-pages.config.ts").contains("base: '/from/file/'"));
}

#[test]
fn no_config_skips_default_file() {
    let ws = Workspace::new();
    ws.write(&ws.tools(), "config-deploy.conf", "[DEFAULT]\napp_base_path = /from/file/\n");

    let err = Run::new(&[])
        .deploy(&ws, &["--action", "write-hosting-config", "--no-config", "--non-interactive"])
        .unwrap_err();

    assert_eq!(exit_status(&err), 78);
    assert!(!ws.site().join("vite.gh-pages.config.ts").exists());
}

#[test]
fn unknown_action_lists_valid_ones() {
    let ws = Workspace::new();
    let err = Run::new(&[]).deploy(&ws, &["--action", "launch"]).unwrap_err();

    assert_eq!(exit_status(&err), 64);
    let msg = format!("{err:#}");
    assert!(msg.contains("unknown action 'launch'"));
    assert!(msg.contains("write-hosting-config"));
    assert!(msg.contains("generate-config"));
}

#[test]
fn missing_action_non_interactive() {
    let ws = Workspace::new();
    let err = Run::new(&[]).deploy(&ws, &["--non-interactive"]).unwrap_err();
    assert_eq!(exit_status(&err), 67);
}

#[test]
fn menu_then_app_name_prompt_defaults_to_folder() {
    let ws = Workspace::new();
    let run = Run::new(&["abc", "3", ""]);

    run.deploy(&ws, &[]).unwrap();

    let content = ws.read(&ws.site(), "vite.react-angular.config.ts");
    assert!(content.contains("name: 'Site',"));
    assert!(content.contains("`site.iif.js`"));
    let asked = run.prompter.asked();
    assert_eq!(asked.len(), 3);
    assert_eq!(asked[2], "Enter the app name (default: site)");
}

#[test]
fn existing_config_needs_overwrite() {
    let ws = Workspace::new();
    ws.write(&ws.site(), "vite.react-angular.config.ts", "keep");

    let err = Run::new(&[])
        .deploy(&ws, &["--action=write-bundle-config", "--app-name=My App"])
        .unwrap_err();
    assert_eq!(exit_status(&err), 73);
    assert_eq!(ws.read(&ws.site(), "vite.react-angular.config.ts"), "keep");

    Run::new(&[])
        .deploy(&ws, &["--action=write-bundle-config", "--app-name=My App", "--overwrite"])
        .unwrap();
    let content = ws.read(&ws.site(), "vite.react-angular.config.ts");
    assert!(content.contains("`my-app.iif.js`"));
    assert!(content.contains("name: 'My app',"));
}

#[test]
fn dry_run_writer_leaves_no_file() {
    let ws = Workspace::new();
    let run = Run::new(&[]);

    run.deploy(&ws, &["--action=write-hosting-config", "--app-base-path=/x/", "-n"])
        .unwrap();

    assert!(!ws.site().join("vite.gh-pages.config.ts").exists());
    assert!(run.log.at("dry_run")[0].contains("base: '/x/'"));
}

#[test]
fn build_requires_hosting_config() {
    let ws = Workspace::new();
    let run = Run::new(&[]);

    let err = run.deploy(&ws, &["--action=build-for-hosting"]).unwrap_err();

    assert_eq!(exit_status(&err), 69);
    assert!(format!("{err:#}").contains("run --action=write-hosting-config first"));
    assert!(run.exec.spawns().is_empty());
}

#[test]
fn build_runs_vite_in_project_directory() {
    let ws = Workspace::new();
    ws.write(&ws.site(), "vite.gh-pages.config.ts", "cfg");
    let run = Run::new(&[]);

    run.deploy(&ws, &["--action=build-gh-pages"]).unwrap();

    let spawns = run.exec.spawns();
    assert_eq!(spawns.len(), 1);
    assert!(spawns[0].program.ends_with("vite"));
    assert_eq!(spawns[0].args, ["build", "--config", "vite.gh-pages.config.ts"]);
    assert_eq!(spawns[0].dir, ws.site());
}

#[test]
fn config_file_paths_do_not_move_the_project() {
    let ws = Workspace::new();
    let export = ws.export();
    ws.write(
        &ws.tools(),
        "config-deploy.conf",
        &format!("[DEFAULT]\nsource = {0}\ntarget = {0}\n", export.display()),
    );
    ws.write(&ws.site(), "vite.gh-pages.config.ts", "cfg");
    let run = Run::new(&[]);

    run.deploy(&ws, &["--action=build-for-hosting"]).unwrap();
    run.deploy(&ws, &["--action=write-bundle-config", "--app-name=demo"])
        .unwrap();

    let spawns = run.exec.spawns();
    assert_eq!(spawns.len(), 1);
    assert_eq!(spawns[0].dir, ws.site());
    assert!(ws.site().join("vite.react-angular.config.ts").is_file());
    assert!(!export.join("vite.react-angular.config.ts").exists());
}

#[test]
fn target_flag_selects_another_project() {
    let ws = Workspace::new();
    ws.write(&ws.export(), "vite.gh-pages.config.ts", "cfg");
    let run = Run::new(&[]);

    run.deploy(&ws, &["--action=build-for-hosting", "--target=../export"])
        .unwrap();

    assert_eq!(run.exec.spawns()[0].dir, ws.site().join("../export"));
}

#[test]
fn publish_failure_propagates_exit_code() {
    let ws = Workspace::new();
    ws.write(&ws.site(), "vite.gh-pages.config.ts", "cfg");
    let run = Run::new(&[]).exec(RecordingExecutor::exiting_with(5));

    let err = run.deploy(&ws, &["--action=deploy-gh-pages"]).unwrap_err();

    assert_eq!(exit_status(&err), 5);
    assert_eq!(run.exec.spawns()[0].args, ["run", "build-gh-pages"]);
}

#[test]
fn bundle_build_dry_run_spawns_nothing() {
    let ws = Workspace::new();
    ws.write(&ws.site(), "vite.react-angular.config.ts", "cfg");
    let run = Run::new(&[]);

    run.deploy(&ws, &["--action=generate-bundle", "--dry-run", "--verbose"])
        .unwrap();

    assert!(run.exec.spawns().is_empty());
    assert!(run.log.contains("running: vite build --config vite.react-angular.config.ts"));
}

#[test]
fn generate_config_copies_example_once() {
    let ws = Workspace::new();
    ws.write(&ws.site(), "index.tsx", "entry");
    ws.write(&ws.tools(), "config-deploy-example.conf", "[DEFAULT]\nsource = ./export\n");

    Run::new(&[]).deploy(&ws, &["--action=generate-config"]).unwrap();
    assert_eq!(
        ws.read(&ws.site(), "config-deploy.conf"),
        "[DEFAULT]\nsource = ./export\n"
    );

    let err = Run::new(&[])
        .deploy(&ws, &["--action=generate-config"])
        .unwrap_err();
    assert_eq!(exit_status(&err), 73);
}

#[test]
fn generate_config_outside_project_fails() {
    let ws = Workspace::new();
    ws.write(&ws.tools(), "config-deploy-example.conf", "[DEFAULT]\n");

    let err = Run::new(&[])
        .deploy(&ws, &["--action=generate-config"])
        .unwrap_err();

    assert_eq!(exit_status(&err), 68);
    assert!(!ws.site().join("config-deploy.conf").exists());
}

#[test]
fn update_index_tsx_with_overwrite_skips_prompt() {
    let ws = Workspace::new();
    ws.write(&ws.site(), "index.tsx", "original");
    ws.write(&ws.tools(), "index.deploy.template.tsx", "template");
    let run = Run::new(&[]);

    run.deploy(&ws, &["--action=update-index-tsx", "--overwrite", "--non-interactive"])
        .unwrap();

    assert_eq!(ws.read(&ws.site(), "index.org.tsx"), "original");
    assert_eq!(ws.read(&ws.site(), "index.tsx"), "template");
    assert!(run.prompter.asked().is_empty());
}

#[test]
fn update_index_tsx_non_interactive_without_overwrite_changes_nothing() {
    let ws = Workspace::new();
    ws.write(&ws.site(), "index.tsx", "original");
    ws.write(&ws.tools(), "index.deploy.template.tsx", "template");

    let err = Run::new(&[])
        .deploy(&ws, &["--action=update-index-tsx", "--non-interactive"])
        .unwrap_err();

    assert_eq!(exit_status(&err), 68);
    assert_eq!(ws.read(&ws.site(), "index.tsx"), "original");
    assert!(!ws.site().join("index.org.tsx").exists());
}

#[test]
fn interrupted_prompt_exits_130() {
    let ws = Workspace::new();
    // No scripted answer: the prompter reports end of input.
    let err = Run::new(&[]).deploy(&ws, &[]).unwrap_err();
    assert_eq!(exit_status(&err), 130);
}
