//! Sync and deploy helpers for React projects exported from a code
//! generator.
//!
//! Two binaries share this library: `react-sync` copies a fresh export into
//! a git-tracked working tree, and `react-deploy` writes Vite configs, builds
//! for static hosting, publishes, and produces an embeddable bundle.
//!
//! The pipeline for every run:
//!
//! - **[`config`]** merges flags, the `[DEFAULT]` section of
//!   `config-deploy.conf` and defaults into an [`EffectiveConfig`](config::EffectiveConfig)
//! - **[`dispatch`]** picks the [`Action`](actions::Action) and runs its handler
//! - **[`validate`]** checks marker files, destinations and prerequisites first
//! - **[`exec`]** prints, dry-runs or spawns the external command
//!
//! Every failure is a [`ToolError`](error::ToolError) with its own exit code.
#![deny(clippy::or_fun_call)]
#![deny(clippy::bool_to_int_with_if)]

pub mod actions;
pub mod cli;
pub mod commands;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod exec;
pub mod logging;
pub mod operations;
pub mod prompt;
pub mod sync_plan;
pub mod templates;
pub mod validate;

/// Version reported by `--version` and the log file header.
pub const VERSION: &str = match option_env!("REACT_TOOLS_VERSION") {
    Some(version) => version,
    None => env!("CARGO_PKG_VERSION"),
};
