// Shared helpers for integration tests.
//
// Provides a temporary workspace laid out like a real run (an export
// directory, a project directory and a tool directory), plus scripted
// stand-ins for the operator, the process spawner and the logger.
//
// Used by all integration test binaries that declare `mod common;`.
#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use react_tools::config::Environment;
use react_tools::error::ToolError;
use react_tools::exec::Executor;
use react_tools::logging::Log;
use react_tools::prompt::{Prompter, is_affirmative, parse_choice};

/// An isolated workspace backed by a [`tempfile::TempDir`].
///
/// ```text
/// <root>/export   sync source
/// <root>/site     sync target and deploy project directory
/// <root>/tools    templates and the deploy tool's default config
/// ```
pub struct Workspace {
    pub root: tempfile::TempDir,
}

impl Workspace {
    pub fn new() -> Self {
        let root = tempfile::tempdir().expect("create temp dir");
        for dir in ["export", "site", "tools"] {
            std::fs::create_dir_all(root.path().join(dir)).expect("create workspace dir");
        }
        Self { root }
    }

    pub fn export(&self) -> PathBuf {
        self.root.path().join("export")
    }

    pub fn site(&self) -> PathBuf {
        self.root.path().join("site")
    }

    pub fn tools(&self) -> PathBuf {
        self.root.path().join("tools")
    }

    /// Write `content` to `rel` under `dir`, creating parent directories.
    pub fn write(&self, dir: &Path, rel: &str, content: &str) -> &Self {
        let path = dir.join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent dir");
        }
        std::fs::write(&path, content).expect("write file");
        self
    }

    /// Put an `index.html` marker in both sync roots.
    pub fn with_markers(self) -> Self {
        self.write(&self.export(), "index.html", "<html>export</html>");
        self.write(&self.site(), "index.html", "<html>site</html>");
        self
    }

    pub fn read(&self, dir: &Path, rel: &str) -> String {
        std::fs::read_to_string(dir.join(rel)).expect("read file")
    }

    /// Environment as seen by a tool started from `cwd`.
    pub fn env_in(&self, cwd: &Path) -> Environment {
        Environment {
            cwd: cwd.to_path_buf(),
            tool_dir: self.tools(),
        }
    }
}

/// A [`Prompter`] that replays canned answers and records every question.
#[derive(Default)]
pub struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompter {
    pub fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| (*a).to_string()).collect()),
            asked: RefCell::default(),
        }
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }

    fn next(&self, question: &str) -> Result<String, ToolError> {
        self.asked.borrow_mut().push(question.to_string());
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or(ToolError::Interrupted)
    }
}

impl Prompter for ScriptedPrompter {
    fn confirm(&self, question: &str) -> Result<bool, ToolError> {
        Ok(is_affirmative(&self.next(question)?))
    }

    fn ask(&self, question: &str) -> Result<String, ToolError> {
        Ok(self.next(question)?.trim().to_string())
    }

    fn select(&self, heading: &str, options: &[&str]) -> Result<usize, ToolError> {
        loop {
            if let Some(index) = parse_choice(&self.next(heading)?, options.len()) {
                return Ok(index);
            }
        }
    }
}

/// One spawn seen by [`RecordingExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Spawn {
    pub program: PathBuf,
    pub args: Vec<String>,
    pub dir: PathBuf,
}

/// An [`Executor`] that records spawns instead of running anything.
pub struct RecordingExecutor {
    exit_code: i32,
    installed: bool,
    spawns: Mutex<Vec<Spawn>>,
}

impl RecordingExecutor {
    /// Every program is installed and exits with `exit_code`.
    pub fn exiting_with(exit_code: i32) -> Self {
        Self {
            exit_code,
            installed: true,
            spawns: Mutex::default(),
        }
    }

    /// No program can be located.
    pub fn nothing_installed() -> Self {
        Self {
            installed: false,
            ..Self::exiting_with(0)
        }
    }

    pub fn spawns(&self) -> Vec<Spawn> {
        self.spawns.lock().expect("spawns lock").clone()
    }
}

impl Executor for RecordingExecutor {
    fn locate(&self, program: &str) -> Option<PathBuf> {
        self.installed
            .then(|| PathBuf::from("/usr/bin").join(program))
    }

    fn status(&self, program: &Path, args: &[String], dir: &Path) -> io::Result<i32> {
        self.spawns.lock().expect("spawns lock").push(Spawn {
            program: program.to_path_buf(),
            args: args.to_vec(),
            dir: dir.to_path_buf(),
        });
        Ok(self.exit_code)
    }
}

/// A [`Log`] that keeps `(level, message)` pairs.
#[derive(Default)]
pub struct CapturedLog {
    lines: Mutex<Vec<(&'static str, String)>>,
}

impl CapturedLog {
    fn push(&self, level: &'static str, msg: &str) {
        self.lines
            .lock()
            .expect("log lock")
            .push((level, msg.to_string()));
    }

    pub fn at(&self, level: &str) -> Vec<String> {
        self.lines
            .lock()
            .expect("log lock")
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.lines
            .lock()
            .expect("log lock")
            .iter()
            .any(|(_, m)| m.contains(needle))
    }
}

impl Log for CapturedLog {
    fn stage(&self, msg: &str) {
        self.push("stage", msg);
    }
    fn info(&self, msg: &str) {
        self.push("info", msg);
    }
    fn debug(&self, msg: &str) {
        self.push("debug", msg);
    }
    fn warn(&self, msg: &str) {
        self.push("warn", msg);
    }
    fn error(&self, msg: &str) {
        self.push("error", msg);
    }
    fn dry_run(&self, msg: &str) {
        self.push("dry_run", msg);
    }
}
