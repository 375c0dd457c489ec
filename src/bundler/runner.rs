//! Tauri CLI subprocess runner.

use crate::error::{BuildError, CliError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;

/// Resolved Tauri CLI invocation: a program plus arguments that prefix
/// every command (e.g. `npm run tauri` → `npm` + `["run", "tauri"]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Runner {
    program: PathBuf,
    prefix_args: Vec<String>,
}

impl Runner {
    /// Create a runner from an already resolved program
    pub fn new(program: impl Into<PathBuf>, prefix_args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            prefix_args,
        }
    }

    /// Resolve the build tool for the project at `root`.
    ///
    /// An explicit script is split shell-style. Otherwise `cargo tauri` is
    /// used when `cargo-tauri` is installed, then `npx tauri` for projects
    /// with a package.json.
    pub fn resolve(root: &Path, tauri_script: Option<&str>) -> Result<Self> {
        if let Some(script) = tauri_script.filter(|s| !s.trim().is_empty()) {
            let mut tokens = shlex::split(script)
                .ok_or_else(|| CliError::InvalidArguments {
                    reason: format!("Could not parse tauri script: {}", script),
                })?
                .into_iter();
            let program = tokens.next().ok_or_else(|| CliError::InvalidArguments {
                reason: "Tauri script is empty".to_string(),
            })?;
            let program = which::which(&program).map_err(|e| BuildError::ToolNotFound {
                reason: format!("{}: {}", program, e),
            })?;
            return Ok(Self::new(program, tokens.collect()));
        }

        if which::which("cargo-tauri").is_ok() {
            let cargo = which::which("cargo").map_err(|e| BuildError::ToolNotFound {
                reason: format!("cargo: {}", e),
            })?;
            return Ok(Self::new(cargo, vec!["tauri".to_string()]));
        }

        if root.join("package.json").is_file() {
            let npx = which::which("npx").map_err(|e| BuildError::ToolNotFound {
                reason: format!("npx: {}", e),
            })?;
            return Ok(Self::new(npx, vec!["tauri".to_string()]));
        }

        Err(BuildError::ToolNotFound {
            reason: "no --tauri-script given, cargo-tauri is not installed and the project has no package.json"
                .to_string(),
        }
        .into())
    }

    /// Program that is executed
    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Full argument list for `command` followed by `args`
    pub fn command_args(&self, command: &[&str], args: &[String]) -> Vec<String> {
        self.prefix_args
            .iter()
            .cloned()
            .chain(command.iter().map(|c| c.to_string()))
            .chain(args.iter().cloned())
            .collect()
    }

    /// Printable command line
    pub fn command_line(&self, command: &[&str], args: &[String]) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.command_args(command, args))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Run a Tauri CLI command in `cwd` and wait for it.
    ///
    /// Output is inherited so the build log streams straight through.
    pub async fn exec_tauri_command(
        &self,
        command: &[&str],
        args: &[String],
        cwd: &Path,
    ) -> Result<()> {
        let command_line = self.command_line(command, args);
        log::info!("Running {} in {}", command_line, cwd.display());

        let status = tokio::process::Command::new(&self.program)
            .args(self.command_args(command, args))
            .current_dir(cwd)
            .stdin(Stdio::null())
            .status()
            .await
            .map_err(|source| BuildError::CommandSpawn {
                command: command_line.clone(),
                source,
            })?;

        if !status.success() {
            return Err(BuildError::CommandFailed {
                command: command_line,
                status: status.to_string(),
            }
            .into());
        }

        Ok(())
    }
}
