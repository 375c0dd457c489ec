//! Command line interface for kodegen_bundler_tauri.
//!
//! This module provides the CLI and GitHub Actions surface: argument
//! parsing, colored output, step outputs and command execution.

pub mod action;
mod args;
pub mod commands;
mod output;

pub use action::{ActionOutputs, error_annotation};
pub use args::{Args, BuildArgs, Command, PublishArgs, RuntimeConfig};
pub use commands::execute_command;
pub use output::OutputManager;

use crate::error::Result;

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    execute_command(args).await
}
