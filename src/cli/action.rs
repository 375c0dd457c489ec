//! GitHub Actions step outputs and workflow commands.

use crate::EnvConfig;
use crate::error::Result;
use std::io::Write;
use std::path::PathBuf;

/// Writes step outputs to `$GITHUB_OUTPUT` when running in a workflow
#[derive(Debug, Clone, Default)]
pub struct ActionOutputs {
    path: Option<PathBuf>,
}

impl ActionOutputs {
    /// Outputs file from the environment, if any
    pub fn from_env(env: &EnvConfig) -> Self {
        Self {
            path: env.get("GITHUB_OUTPUT").map(PathBuf::from),
        }
    }

    /// Append `name=value`; multi-line values use the heredoc form
    pub fn set(&self, name: &str, value: &str) -> Result<()> {
        log::info!("Output {}={}", name, value);

        let Some(path) = &self.path else {
            return Ok(());
        };

        let mut file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        file.write_all(format_output(name, value).as_bytes())?;
        Ok(())
    }

    /// Record the artifact list as a JSON array
    pub fn set_artifact_paths(&self, artifacts: &[PathBuf]) -> Result<()> {
        let paths: Vec<String> = artifacts
            .iter()
            .map(|p| p.display().to_string())
            .collect();
        self.set("artifactPaths", &serde_json::to_string(&paths)?)
    }
}

fn format_output(name: &str, value: &str) -> String {
    if value.contains('\n') {
        let delimiter = format!("ghadelimiter_{}", std::process::id());
        format!("{name}<<{delimiter}\n{value}\n{delimiter}\n")
    } else {
        format!("{name}={value}\n")
    }
}

/// `::error::` workflow command with the message escaped
pub fn error_annotation(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}
